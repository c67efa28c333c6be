//! In-memory host that records every call
//!
//! Used by tests and by headless sessions that need to inspect what the
//! manager asked the shell to do.

use std::sync::Mutex;

use serde_json::Value;

use super::{HostLayout, HostServices, HostSurface, NotifyLevel};
use crate::error::HostError;

/// A call made by the manager into the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Notify { message: String, level: NotifyLevel },
    Tooltip { content: Value, position: Value },
    Config { request: Value },
    Transitioning(bool),
}

/// Host that answers config requests with a fixed reply and records calls
pub struct RecordingHost {
    layout: HostLayout,
    config_reply: Mutex<Result<Value, String>>,
    calls: Mutex<Vec<HostCall>>,
    transitioning: Mutex<bool>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::with_layout(HostLayout::default())
    }

    pub fn with_layout(layout: HostLayout) -> Self {
        Self {
            layout,
            config_reply: Mutex::new(Ok(Value::Null)),
            calls: Mutex::new(Vec::new()),
            transitioning: Mutex::new(false),
        }
    }

    /// Answer future config requests with `reply`
    pub fn set_config_reply(&self, reply: Value) {
        *self.config_reply.lock().unwrap_or_else(|e| e.into_inner()) = Ok(reply);
    }

    /// Fail future config requests with `reason`
    pub fn fail_config(&self, reason: impl Into<String>) {
        *self.config_reply.lock().unwrap_or_else(|e| e.into_inner()) = Err(reason.into());
    }

    /// All recorded calls, oldest first
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded notifications as `(message, level)` pairs
    pub fn notifications(&self) -> Vec<(String, NotifyLevel)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Notify { message, level } => Some((message, level)),
                _ => None,
            })
            .collect()
    }

    /// Whether the transition marker is currently set
    pub fn is_transitioning(&self) -> bool {
        *self.transitioning.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, call: HostCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostServices for RecordingHost {
    fn notify(&self, message: &str, level: NotifyLevel) {
        self.record(HostCall::Notify {
            message: message.to_string(),
            level,
        });
    }

    fn tooltip(&self, content: Value, position: Value) {
        self.record(HostCall::Tooltip { content, position });
    }

    fn config(&self, request: Value) -> Result<Value, HostError> {
        self.record(HostCall::Config { request });
        self.config_reply
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .map_err(HostError::InvalidRequest)
    }
}

impl HostSurface for RecordingHost {
    fn header_height(&self) -> f64 {
        self.layout.header_height
    }

    fn sidebar_width(&self) -> f64 {
        self.layout.sidebar_width
    }

    fn set_transitioning(&self, active: bool) {
        *self.transitioning.lock().unwrap_or_else(|e| e.into_inner()) = active;
        self.record(HostCall::Transitioning(active));
    }
}
