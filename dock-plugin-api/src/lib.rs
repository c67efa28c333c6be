//! dock-plugin-api - the contract between the dock shell and its plugin views
//!
//! A plugin is an independently sandboxed view living in its own folder under
//! the plugins directory. The shell never renders plugin content itself; it
//! only talks to each view through a [`PluginHandle`]:
//!
//! - **Commands** flow shell → view: `show`, `hide`, `toggle_dev_tools`,
//!   `send_to_view`.
//! - **Events** flow view → shell through the [`PluginEventSender`] handed to
//!   the handle when it is created: content-ready, transition requests,
//!   inbound messages and console output.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use std::sync::Arc;
//! use dock_plugin_api::{PluginError, PluginEventSender, PluginHandle, PluginHandleFactory};
//!
//! struct WebviewFactory;
//!
//! impl PluginHandleFactory for WebviewFactory {
//!     fn create(
//!         &self,
//!         plugin_dir: &Path,
//!         name: &str,
//!         events: PluginEventSender,
//!     ) -> Result<Arc<dyn PluginHandle>, PluginError> {
//!         let view = Webview::open(plugin_dir.join(name).join("index.html"), events)?;
//!         Ok(Arc::new(view))
//!     }
//! }
//! ```

pub mod console;
pub mod error;
pub mod event;
pub mod handle;
pub mod message;

pub use console::ConsoleMessage;
pub use error::PluginError;
pub use event::{PluginEvent, PluginEventKind, PluginEventSender, event_channel};
pub use handle::{PluginHandle, PluginHandleFactory};
pub use message::{Channel, InboundMessage};
