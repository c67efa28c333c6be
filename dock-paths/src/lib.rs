//! XDG Base Directory paths for dock.
//!
//! The shell keeps its config file and the plugins folder under the XDG
//! config directory on every platform, so paths look the same on Linux
//! and macOS.

use std::path::PathBuf;

/// Get the dock config directory.
///
/// Returns `$XDG_CONFIG_HOME/dock` if set, otherwise `~/.config/dock`.
///
/// # Examples
///
/// ```
/// use dock_paths::config_dir;
///
/// let config = config_dir();
/// let config_file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("dock")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/dock")
    } else {
        PathBuf::from(".config/dock")
    }
}

/// Default directory scanned for plugin bundles.
///
/// Every immediate subdirectory of this folder is one plugin.
pub fn plugins_dir() -> PathBuf {
    config_dir().join("plugins")
}

/// Path of the JSON document backing the `config` message channel.
pub fn host_config_file() -> PathBuf {
    config_dir().join("config.json")
}
