//! Session configuration for the plugin manager

use std::path::PathBuf;
use std::time::Duration;

/// Default duration of the fade between two plugin views
pub const DEFAULT_TRANSITION_WINDOW: Duration = Duration::from_millis(170);

/// Configuration snapshot read once by [`Manager::init`](crate::Manager::init)
///
/// Changing the home plugin after init only affects the next session; live
/// plugin views are never reconfigured.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    /// Plugin opened first, if installed
    pub home_plugin: Option<String>,
    /// Directory whose subdirectories are the installed plugins
    pub plugins_dir: PathBuf,
    /// How long the transition marker stays on the host surface
    pub transition_window: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            home_plugin: None,
            plugins_dir: dock_paths::plugins_dir(),
            transition_window: DEFAULT_TRANSITION_WINDOW,
        }
    }
}

impl ManagerConfig {
    /// Config scanning the given plugins directory, with defaults otherwise
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_home_plugin(mut self, name: impl Into<String>) -> Self {
        self.home_plugin = Some(name.into());
        self
    }

    pub fn with_transition_window(mut self, window: Duration) -> Self {
        self.transition_window = window;
        self
    }
}
