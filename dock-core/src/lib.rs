//! dock-core: plugin lifecycle and message routing for the dock shell
//!
//! This crate owns everything between the shell window and its plugin views:
//!
//! - **Discovery** - [`plugins::discover_plugin_names`] lists plugin folders
//! - **Ordering** - [`plugins::compute_order`] decides sidebar/activation order and the home plugin
//! - **Lifecycle** - [`LifecycleCoordinator`] keeps one plugin visible and drives transitions
//! - **Routing** - [`MessageRouter`] dispatches plugin messages to the host services
//! - **Manager** - [`Manager`] composes the above and owns the session state
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use dock_core::{Manager, ManagerConfig, MockHandleFactory, RecordingHost};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = Arc::new(RecordingHost::new());
//!     let factory = Arc::new(MockHandleFactory::auto_ready());
//!     let mut manager = Manager::new(factory, host.clone(), host);
//!
//!     manager
//!         .init(ManagerConfig::new("/opt/dock/plugins").with_home_plugin("Files"))
//!         .await?;
//!     manager.process_pending();
//!
//!     println!("Active plugin: {:?}", manager.active_plugin());
//!     Ok(())
//! }
//! ```
//!
//! # Event flow
//!
//! ```text
//!  plugin views ──PluginEventSender──┐
//!                                    ▼
//!                         ┌──────────────────────┐
//!  transition timer ─────▶│       Manager        │
//!                         │ ┌──────────────────┐ │
//!                         │ │ LifecycleCoord.  │─┼──▶ show / hide
//!                         │ ├──────────────────┤ │
//!                         │ │  MessageRouter   │─┼──▶ HostServices
//!                         │ └──────────────────┘ │
//!                         └──────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod plugins;

pub use config::{DEFAULT_TRANSITION_WINDOW, ManagerConfig};
pub use error::{HostError, ManagerError};
pub use host::{
    HostCall, HostLayout, HostServices, HostSurface, JsonConfigService, NotifyLevel,
    RecordingHost, TracingHost,
};
pub use plugins::{
    Activation, LifecycleCoordinator, Manager, ManagerState, MessageRouter, MockHandleFactory,
    MockPluginHandle, OrderOutcome, PluginInfo, PluginRecord, PluginRegistry, PluginState,
    RouteOutcome,
};
