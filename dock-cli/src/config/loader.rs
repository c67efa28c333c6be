use std::path::{Path, PathBuf};

use anyhow::Result;

use super::types::{
    DockConfig, LayoutConfig, PluginsConfig, RawDockConfig, RawLayoutConfig, RawPluginsConfig,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<DockConfig> {
        let mut raw = RawDockConfig::default();

        // Layer 1: User config
        let user_path = Self::user_config_path();
        if user_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    /// Load a single config file, applying defaults for missing values
    pub fn load_from_path(path: &Path) -> Result<DockConfig> {
        if !path.exists() {
            return Ok(DockConfig::default());
        }
        Ok(Self::finalize(Self::read_raw(path)?))
    }

    /// User config path (`$XDG_CONFIG_HOME/dock/config.toml`)
    pub fn user_config_path() -> PathBuf {
        dock_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with DOCK_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("DOCK_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".dock/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawDockConfig> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawDockConfig, overlay: RawDockConfig) -> RawDockConfig {
        RawDockConfig {
            plugins: RawPluginsConfig {
                home: overlay.plugins.home.or(base.plugins.home),
                dir: overlay.plugins.dir.or(base.plugins.dir),
                transition_window_ms: overlay
                    .plugins
                    .transition_window_ms
                    .or(base.plugins.transition_window_ms),
            },
            layout: RawLayoutConfig {
                header_height: overlay.layout.header_height.or(base.layout.header_height),
                sidebar_width: overlay.layout.sidebar_width.or(base.layout.sidebar_width),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawDockConfig) -> DockConfig {
        let plugins = PluginsConfig::default();
        let layout = LayoutConfig::default();

        DockConfig {
            plugins: PluginsConfig {
                home: raw.plugins.home,
                dir: raw.plugins.dir.unwrap_or(plugins.dir),
                transition_window_ms: raw
                    .plugins
                    .transition_window_ms
                    .unwrap_or(plugins.transition_window_ms),
            },
            layout: LayoutConfig {
                header_height: raw.layout.header_height.unwrap_or(layout.header_height),
                sidebar_width: raw.layout.sidebar_width.unwrap_or(layout.sidebar_width),
            },
        }
    }

    /// Save config to the user config path
    pub fn save_to_user_config(config: &DockConfig) -> Result<PathBuf> {
        let path = Self::user_config_path();
        Self::save_to_path(config, &path)?;
        Ok(path)
    }

    /// Save config to a specific path
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to_path(config: &DockConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(config)?;
        std::fs::write(path, toml)?;

        Ok(())
    }
}
