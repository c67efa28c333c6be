//! Error types for dock-core

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the plugin manager
///
/// `AlreadyInitialized` and `UnknownPlugin` are caller contract violations;
/// they are returned instead of being silently ignored.
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Plugin manager is already initialized")]
    AlreadyInitialized,

    #[error("Plugin '{name}' is not registered")]
    UnknownPlugin { name: String },

    #[error("Couldn't read plugins folder {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create plugin '{name}': {source}")]
    Handle {
        name: String,
        #[source]
        source: dock_plugin_api::PluginError,
    },
}

/// Errors raised by host services
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Invalid config request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
