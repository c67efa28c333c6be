//! Console output from plugin views
//!
//! Plugin console lines are observability only: they are logged and never
//! routed.

use dock_plugin_api::ConsoleMessage;

/// Tracing target used for plugin console lines
pub const CONSOLE_TARGET: &str = "dock::plugin_console";

/// Human readable form of a console line
pub fn format_console_line(plugin: &str, message: &ConsoleMessage) -> String {
    format!(
        "{} plugin logged from {}({}): {}",
        plugin,
        message.source_file(),
        message.line,
        message.message
    )
}

/// Emit a plugin console line as a structured log event
pub fn log_console_message(plugin: &str, message: &ConsoleMessage) {
    tracing::info!(
        target: CONSOLE_TARGET,
        plugin = %plugin,
        source = %message.source_file(),
        line = message.line,
        "{}",
        format_console_line(plugin, message)
    );
}
