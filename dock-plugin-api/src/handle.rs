//! The capability interface the shell uses to drive a plugin view

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::PluginError;
use crate::event::PluginEventSender;

/// A sandboxed plugin view hosted by the shell.
///
/// All methods are synchronous signalling calls. A handle may start
/// asynchronous work (rendering, reloading) in response, but must not block
/// the caller. Handles are shared (`Arc`) so implementations use interior
/// mutability.
pub trait PluginHandle: Send + Sync {
    /// Directory-derived plugin name
    fn name(&self) -> &str;

    /// Make the view visible
    fn show(&self);

    /// Hide the view
    fn hide(&self);

    /// Whether the view is currently visible
    fn is_visible(&self) -> bool;

    /// Whether the view is still loading its content
    fn is_loading(&self) -> bool;

    /// Open or close the view's own inspector
    fn toggle_dev_tools(&self);

    /// Deliver a payload to the view on a named channel
    fn send_to_view(&self, channel: &str, payload: Value) -> Result<(), PluginError>;
}

/// Builds plugin handles from bundles on disk
///
/// The factory owns the bundle format; the shell only passes the plugins
/// directory, the plugin name and the event sender the new handle must use.
pub trait PluginHandleFactory: Send + Sync {
    fn create(
        &self,
        plugins_dir: &Path,
        name: &str,
        events: PluginEventSender,
    ) -> Result<Arc<dyn PluginHandle>, PluginError>;
}
