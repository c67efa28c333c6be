//! Host UI services consumed by the plugin manager
//!
//! The notification, tooltip and config subsystems belong to the shell UI.
//! The manager only calls them through [`HostServices`], and reads layout
//! and toggles the transition marker through [`HostSurface`].

mod json_config;
mod recording;
mod tracing_host;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HostError;

pub use json_config::JsonConfigService;
pub use recording::{HostCall, RecordingHost};
pub use tracing_host::TracingHost;

/// Severity of a shell notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotifyLevel {
    /// Parse a level name sent by a plugin
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            "warning" | "alert" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shell UI services plugins can reach through messages
pub trait HostServices: Send + Sync {
    /// Show a notification
    fn notify(&self, message: &str, level: NotifyLevel);

    /// Show a tooltip at a position in shell coordinates
    fn tooltip(&self, content: Value, position: Value);

    /// Run a get/set request against the persistent configuration
    fn config(&self, request: Value) -> Result<Value, HostError>;
}

/// The shell surface plugin views are laid out in
pub trait HostSurface: Send + Sync {
    /// Height of the shell header above the plugin views
    fn header_height(&self) -> f64;

    /// Width of the sidebar left of the plugin views
    fn sidebar_width(&self) -> f64;

    /// Set or clear the transition marker on the main area
    fn set_transitioning(&self, active: bool);
}

/// Fixed shell layout used by headless surfaces
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HostLayout {
    pub header_height: f64,
    pub sidebar_width: f64,
}
