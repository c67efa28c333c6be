//! Error types for plugin handles

use thiserror::Error;

/// Errors raised by plugin handles and handle factories
#[derive(Error, Debug)]
pub enum PluginError {
    /// The plugin bundle could not be loaded into a view
    #[error("Failed to load plugin '{name}': {reason}")]
    Load { name: String, reason: String },

    /// The view behind the handle is gone
    #[error("Plugin view '{0}' is closed")]
    ViewClosed(String),

    /// The shell side of the event channel has been dropped
    #[error("Event channel for plugin '{0}' is disconnected")]
    Disconnected(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

impl PluginError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Create a load error for the named plugin
    pub fn load(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
