use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigLoader, DockConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged)
    Show,
    /// Show configuration file paths
    Path,
    /// Set the plugin opened first in the next session
    SetHome {
        /// Plugin name; omit to fall back to the first plugin in order
        name: Option<String>,
    },
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => show_paths(),
        ConfigCommands::SetHome { name } => set_home(name),
    }
}

fn show_config() -> Result<()> {
    let config = ConfigLoader::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", toml_str);
    Ok(())
}

fn show_paths() -> Result<()> {
    println!("User config:    {}", ConfigLoader::user_config_path().display());
    println!("Project config: {}", ConfigLoader::project_config_path().display());
    println!("Host config:    {}", dock_paths::host_config_file().display());
    Ok(())
}

fn set_home(name: Option<String>) -> Result<()> {
    let mut config = ConfigLoader::load_from_path(&ConfigLoader::user_config_path())?;
    let previous = with_home(&mut config, name);
    let path = ConfigLoader::save_to_user_config(&config)?;

    match (&previous, &config.plugins.home) {
        (Some(old), Some(new)) => println!("Home plugin: {} -> {}", old, new),
        (None, Some(new)) => println!("Home plugin: {}", new),
        (_, None) => println!("Home plugin cleared, the first plugin opens first"),
    }
    println!("Saved to {}", path.display());
    println!("Takes effect the next time the shell starts.");
    Ok(())
}

/// Replace the home plugin, returning the previous one
fn with_home(config: &mut DockConfig, name: Option<String>) -> Option<String> {
    let name = name.filter(|n| !n.trim().is_empty());
    std::mem::replace(&mut config.plugins.home, name)
}
