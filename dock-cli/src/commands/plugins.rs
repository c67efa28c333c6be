//! Plugin inspection commands

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use dock_core::plugins::{compute_order, discover_plugin_names};
use dock_core::{
    JsonConfigService, Manager, MockHandleFactory, OrderOutcome, PluginInfo, TracingHost,
};

use crate::config::{ConfigLoader, DockConfig};

/// Plugin inspection arguments
#[derive(Args)]
pub struct PluginsArgs {
    #[command(subcommand)]
    pub command: PluginsCommands,
}

/// Overrides for the configured plugin session
#[derive(Args, Clone, Default)]
pub struct SessionArgs {
    /// Plugins folder to scan instead of the configured one
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Home plugin instead of the configured one
    #[arg(long)]
    pub home: Option<String>,
}

/// Plugin subcommands
#[derive(Subcommand)]
pub enum PluginsCommands {
    /// Print the order plugins appear in and the home plugin
    Order(SessionArgs),
    /// Preview a session: plugin order, home and the initially active plugin.
    ///
    /// Plugin views are simulated, so bundles are not loaded or checked.
    List(SessionArgs),
}

/// Run plugins command
pub async fn run(args: PluginsArgs) -> Result<()> {
    let config = ConfigLoader::load()?;

    match args.command {
        PluginsCommands::Order(session) => show_order(apply(config, session)).await,
        PluginsCommands::List(session) => list_plugins(apply(config, session)).await,
    }
}

/// Apply command line overrides on top of the loaded config
fn apply(mut config: DockConfig, session: SessionArgs) -> DockConfig {
    if let Some(dir) = session.dir {
        config.plugins.dir = dir;
    }
    if let Some(home) = session.home {
        config.plugins.home = Some(home);
    }
    config
}

async fn show_order(config: DockConfig) -> Result<()> {
    let names = discover_plugin_names(&config.plugins.dir).await?;
    let outcome = compute_order(names, config.plugins.home.as_deref());

    if outcome.order.is_empty() {
        print_empty(&config);
        return Ok(());
    }
    for line in format_order(&outcome) {
        println!("{}", line);
    }
    if outcome.adopted && config.plugins.home.is_some() {
        println!();
        println!(
            "Home plugin {:?} is not installed, using {:?}",
            config.plugins.home.as_deref().unwrap_or_default(),
            outcome.home.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

async fn list_plugins(config: DockConfig) -> Result<()> {
    let host_config = JsonConfigService::load(dock_paths::host_config_file())?;
    let host = Arc::new(TracingHost::new(config.host_layout(), host_config));
    let factory = Arc::new(MockHandleFactory::auto_ready());

    let mut manager = Manager::new(factory, host.clone(), host);
    manager.init(config.manager_config()).await?;
    let processed = manager.process_pending();
    tracing::debug!(events = processed, "Headless session settled");

    let plugins = manager.plugins();
    if plugins.is_empty() {
        print_empty(&config);
        return Ok(());
    }
    println!("Session preview (plugin views simulated):");
    for line in format_plugins(&plugins) {
        println!("{}", line);
    }
    Ok(())
}

fn print_empty(config: &DockConfig) {
    println!("No plugins installed");
    println!();
    println!("Plugin directory: {}", config.plugins.dir.display());
    println!("Each folder in the plugin directory is one plugin.");
}

/// One line per plugin, home marked
fn format_order(outcome: &OrderOutcome) -> Vec<String> {
    outcome
        .order
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if outcome.home.as_deref() == Some(name.as_str()) {
                format!("{:>2}. {} (home)", idx + 1, name)
            } else {
                format!("{:>2}. {}", idx + 1, name)
            }
        })
        .collect()
}

/// One line per plugin with home and selection markers. Load state is left
/// out since the views are simulated.
fn format_plugins(plugins: &[PluginInfo]) -> Vec<String> {
    plugins
        .iter()
        .map(|p| {
            let mut line = format!("{:>2}. {}", p.order + 1, p.name);
            if p.home {
                line.push_str(" (home)");
            }
            if p.active {
                line.push_str(" [active]");
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_core::PluginState;

    #[test]
    fn test_format_order_marks_home() {
        let outcome = compute_order(
            vec!["About".to_string(), "Files".to_string(), "Storage".to_string()],
            None,
        );

        assert_eq!(
            format_order(&outcome),
            vec![" 1. Storage (home)", " 2. Files", " 3. About"]
        );
    }

    #[test]
    fn test_format_plugins_marks_home_and_active() {
        let plugins = vec![
            PluginInfo {
                name: "Files".to_string(),
                order: 0,
                home: true,
                state: PluginState::Ready,
                active: true,
                visible: true,
            },
            PluginInfo {
                name: "Wallet".to_string(),
                order: 1,
                home: false,
                state: PluginState::Loading,
                active: false,
                visible: false,
            },
        ];

        assert_eq!(
            format_plugins(&plugins),
            vec![" 1. Files (home) [active]", " 2. Wallet"]
        );
    }

    #[test]
    fn test_apply_overrides_config() {
        let session = SessionArgs {
            dir: Some(PathBuf::from("/tmp/plugins")),
            home: Some("Wallet".to_string()),
        };

        let config = apply(DockConfig::default(), session);

        assert_eq!(config.plugins.dir, PathBuf::from("/tmp/plugins"));
        assert_eq!(config.plugins.home.as_deref(), Some("Wallet"));
    }

    #[test]
    fn test_apply_without_overrides_keeps_config() {
        let config = apply(DockConfig::default(), SessionArgs::default());
        assert_eq!(config, DockConfig::default());
    }

    #[tokio::test]
    async fn test_headless_session_lists_plugins() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["About", "Files", "Wallet"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        let config = apply(
            DockConfig::default(),
            SessionArgs {
                dir: Some(dir.path().to_path_buf()),
                home: Some("Wallet".to_string()),
            },
        );

        let host = Arc::new(TracingHost::new(
            config.host_layout(),
            JsonConfigService::load(dir.path().join("config.json")).unwrap(),
        ));
        let factory = Arc::new(MockHandleFactory::auto_ready());
        let mut manager = Manager::new(factory, host.clone(), host);
        manager.init(config.manager_config()).await.unwrap();
        manager.process_pending();

        assert_eq!(
            format_plugins(&manager.plugins()),
            vec![" 1. Wallet (home) [active]", " 2. Files", " 3. About"]
        );
    }
}
