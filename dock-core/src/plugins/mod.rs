//! Plugin lifecycle and message routing
//!
//! - [`Manager`]: session facade that discovers, orders, registers and drives plugins
//! - [`LifecycleCoordinator`]: single-active-plugin invariant and timed transitions
//! - [`MessageRouter`]: dispatches plugin messages to host services
//! - [`PluginRegistry`]: plugin records in activation order
//! - [`compute_order`]: sidebar order and home plugin selection
//!
//! # Plugin Discovery
//!
//! Every immediate subdirectory of the configured plugins directory is one
//! plugin, named after the folder:
//!
//! ```text
//! plugins/
//! ├── About/
//! ├── Files/
//! └── Wallet/
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut manager = Manager::new(factory, services, surface);
//! manager.init(ManagerConfig::new(plugins_dir)).await?;
//!
//! // Drain plugin events until shutdown
//! manager.run(shutdown).await;
//! ```

mod console;
mod discovery;
mod lifecycle;
mod manager;
mod mock;
mod ordering;
mod registry;
mod router;

pub use console::{CONSOLE_TARGET, format_console_line, log_console_message};
pub use discovery::discover_plugin_names;
pub use lifecycle::{Activation, LifecycleCoordinator, TransitionWindowElapsed};
pub use manager::{Manager, ManagerState};
pub use mock::{MockHandleFactory, MockPluginHandle};
pub use ordering::{ABOUT_PLUGIN, OrderOutcome, compute_order};
pub use registry::{PluginInfo, PluginRecord, PluginRegistry, PluginState};
pub use router::{MessageRouter, RouteOutcome};
