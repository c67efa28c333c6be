//! End-to-end tests for the dock binary
//!
//! Gated behind the `integration` feature flag. Run with:
//!
//! ```sh
//! cargo test -p dock-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run `dock` with its config isolated under `root`
fn dock(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dock"))
        .args(args)
        .env("XDG_CONFIG_HOME", root.join("xdg"))
        .env("DOCK_PROJECT_CONFIG_DIR", root.join("project"))
        .output()
        .expect("Failed to run dock")
}

#[test]
fn dock_help_works() {
    let root = TempDir::new().unwrap();
    let output = dock(root.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("plugins"));
    assert!(stdout.contains("config"));
}

#[test]
fn dock_plugins_order_prints_home_first() {
    let root = TempDir::new().unwrap();
    let plugins = root.path().join("plugins");
    for name in ["About", "Files", "Storage"] {
        std::fs::create_dir_all(plugins.join(name)).unwrap();
    }

    let output = dock(
        root.path(),
        &["plugins", "order", "--dir", plugins.to_str().unwrap(), "--home", "Files"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![" 1. Files (home)", " 2. Storage", " 3. About"]);
}

#[test]
fn dock_config_set_home_persists() {
    let root = TempDir::new().unwrap();

    let output = dock(root.path(), &["config", "set-home", "Wallet"]);
    assert!(output.status.success());

    let output = dock(root.path(), &["config", "show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("home = \"Wallet\""));
    assert!(stdout.contains("transition_window_ms = 170"));
}

#[test]
fn dock_config_show_works_without_config() {
    let root = TempDir::new().unwrap();
    let output = dock(root.path(), &["config", "show"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[plugins]"));
    assert!(stdout.contains("[layout]"));
}
