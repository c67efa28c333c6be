use std::path::PathBuf;
use std::time::Duration;

use dock_core::{DEFAULT_TRANSITION_WINDOW, HostLayout, ManagerConfig};
use serde::{Deserialize, Serialize};

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDockConfig {
    #[serde(default)]
    pub plugins: RawPluginsConfig,

    #[serde(default)]
    pub layout: RawLayoutConfig,
}

/// Plugin session settings as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPluginsConfig {
    /// Plugin opened first
    pub home: Option<String>,

    /// Folder scanned for plugins
    pub dir: Option<PathBuf>,

    /// Fade duration between plugin views, in milliseconds
    pub transition_window_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawLayoutConfig {
    pub header_height: Option<f64>,
    pub sidebar_width: Option<f64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DockConfig {
    #[serde(default)]
    pub plugins: PluginsConfig,

    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginsConfig {
    /// Plugin opened first; the first plugin in order when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    /// Folder scanned for plugins
    pub dir: PathBuf,

    /// Fade duration between plugin views, in milliseconds
    pub transition_window_ms: u64,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            home: None,
            dir: dock_paths::plugins_dir(),
            transition_window_ms: DEFAULT_TRANSITION_WINDOW.as_millis() as u64,
        }
    }
}

/// Shell chrome around the plugin views
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LayoutConfig {
    pub header_height: f64,
    pub sidebar_width: f64,
}

impl DockConfig {
    /// Session config for the plugin manager
    pub fn manager_config(&self) -> ManagerConfig {
        let mut config = ManagerConfig::new(&self.plugins.dir)
            .with_transition_window(Duration::from_millis(self.plugins.transition_window_ms));
        if let Some(home) = &self.plugins.home {
            config = config.with_home_plugin(home.clone());
        }
        config
    }

    pub fn host_layout(&self) -> HostLayout {
        HostLayout {
            header_height: self.layout.header_height,
            sidebar_width: self.layout.sidebar_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = DockConfig::default();
        assert!(config.plugins.home.is_none());
        assert!(config.plugins.dir.ends_with("plugins"));
        assert_eq!(config.plugins.transition_window_ms, 170);
        assert_eq!(config.layout.header_height, 0.0);
    }

    #[test]
    fn test_manager_config_carries_settings() {
        let config = DockConfig {
            plugins: PluginsConfig {
                home: Some("Files".to_string()),
                dir: PathBuf::from("/opt/dock/plugins"),
                transition_window_ms: 250,
            },
            ..Default::default()
        };

        let manager = config.manager_config();

        assert_eq!(manager.home_plugin.as_deref(), Some("Files"));
        assert_eq!(manager.plugins_dir, PathBuf::from("/opt/dock/plugins"));
        assert_eq!(manager.transition_window, Duration::from_millis(250));
    }

    #[test]
    fn test_host_layout_from_config() {
        let config = DockConfig {
            layout: LayoutConfig {
                header_height: 38.0,
                sidebar_width: 64.0,
            },
            ..Default::default()
        };

        let layout = config.host_layout();
        assert_eq!(layout.header_height, 38.0);
        assert_eq!(layout.sidebar_width, 64.0);
    }

    #[test]
    fn test_raw_config_accepts_partial_toml() {
        let raw: RawDockConfig = toml::from_str("[plugins]\nhome = \"Wallet\"\n").unwrap();
        assert_eq!(raw.plugins.home.as_deref(), Some("Wallet"));
        assert!(raw.plugins.dir.is_none());
        assert!(raw.layout.sidebar_width.is_none());
    }
}
