//! Manager - session facade over discovery, ordering, lifecycle and routing

use std::sync::Arc;

use dock_plugin_api::{
    PluginEvent, PluginEventKind, PluginEventSender, PluginHandleFactory, event_channel,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::console::log_console_message;
use super::discovery::discover_plugin_names;
use super::lifecycle::{Activation, LifecycleCoordinator, TransitionWindowElapsed};
use super::ordering::compute_order;
use super::registry::{PluginInfo, PluginRecord, PluginRegistry, PluginState};
use super::router::MessageRouter;
use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::host::{HostServices, HostSurface, NotifyLevel};

/// Initialization state of a [`Manager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Uninitialized,
    Discovering,
    Ready,
}

/// Owns the plugin session for the lifetime of the shell UI.
///
/// All session state lives here and is only touched through `&mut self`.
/// Plugin views report back through one FIFO queue, so events of a single
/// plugin are handled in the order they were emitted.
pub struct Manager {
    factory: Arc<dyn PluginHandleFactory>,
    services: Arc<dyn HostServices>,
    router: MessageRouter,
    coordinator: LifecycleCoordinator,
    registry: PluginRegistry,
    config: ManagerConfig,
    state: ManagerState,
    /// Effective home plugin of this session
    home: Option<String>,
    events_tx: mpsc::UnboundedSender<PluginEvent>,
    events_rx: mpsc::UnboundedReceiver<PluginEvent>,
    timer_rx: mpsc::UnboundedReceiver<TransitionWindowElapsed>,
}

impl Manager {
    pub fn new(
        factory: Arc<dyn PluginHandleFactory>,
        services: Arc<dyn HostServices>,
        surface: Arc<dyn HostSurface>,
    ) -> Self {
        let (events_tx, events_rx) = event_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        Self {
            factory,
            router: MessageRouter::new(Arc::clone(&services), Arc::clone(&surface)),
            coordinator: LifecycleCoordinator::new(surface, timer_tx),
            services,
            registry: PluginRegistry::new(),
            config: ManagerConfig::default(),
            state: ManagerState::Uninitialized,
            home: None,
            events_tx,
            events_rx,
            timer_rx,
        }
    }

    /// Discover, order and register the installed plugins.
    ///
    /// A plugins directory that can't be read is reported through the
    /// notification service and the session continues with no plugins.
    /// Calling `init` twice is rejected.
    pub async fn init(&mut self, config: ManagerConfig) -> Result<(), ManagerError> {
        if self.state != ManagerState::Uninitialized {
            return Err(ManagerError::AlreadyInitialized);
        }
        self.state = ManagerState::Discovering;
        self.coordinator.set_transition_window(config.transition_window);

        let names = match discover_plugin_names(&config.plugins_dir).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "Plugin discovery failed");
                self.services.notify(&e.to_string(), NotifyLevel::Error);
                Vec::new()
            }
        };

        let outcome = compute_order(names, config.home_plugin.as_deref());
        self.config = config;
        if outcome.adopted {
            tracing::info!(
                plugin = ?outcome.home,
                "Preferred home plugin not installed, adopting first plugin"
            );
            self.config.home_plugin = outcome.home.clone();
        }
        self.home = outcome.home;

        for name in &outcome.order {
            if let Err(e) = self.add_plugin(name) {
                tracing::warn!(plugin = %name, error = %e, "Skipping plugin");
                self.services.notify(&e.to_string(), NotifyLevel::Error);
            }
        }

        tracing::info!(
            count = self.registry.len(),
            home = ?self.registry.home().map(|record| record.name.as_str()),
            "Plugin session ready"
        );
        self.state = ManagerState::Ready;
        Ok(())
    }

    /// Create and register the plugin `name`. Adding a registered plugin
    /// again does nothing.
    pub fn add_plugin(&mut self, name: &str) -> Result<(), ManagerError> {
        if self.registry.contains(name) {
            tracing::debug!(plugin = %name, "Plugin already registered");
            return Ok(());
        }

        let events = PluginEventSender::new(name, self.events_tx.clone());
        let handle = self
            .factory
            .create(&self.config.plugins_dir, name, events)
            .map_err(|source| ManagerError::Handle {
                name: name.to_string(),
                source,
            })?;

        let home = self.home.as_deref() == Some(name);
        self.registry.insert(PluginRecord {
            name: name.to_string(),
            handle,
            order: self.registry.len(),
            home,
            state: PluginState::Loading,
        });
        if home {
            self.coordinator.bind_home(name);
        }

        tracing::debug!(plugin = %name, home, "Registered plugin");
        Ok(())
    }

    /// Switch the visible plugin
    pub fn request_activate(&mut self, name: &str) -> Result<Activation, ManagerError> {
        self.coordinator.request_activate(&self.registry, name)
    }

    /// Process one plugin event to completion
    pub fn handle_event(&mut self, event: PluginEvent) {
        let PluginEvent { plugin, kind } = event;

        match kind {
            PluginEventKind::ContentReady => {
                if let Some(record) = self.registry.get_mut(&plugin)
                    && record.state == PluginState::Loading
                {
                    record.state = PluginState::Ready;
                }
                self.coordinator.on_content_ready(&self.registry, &plugin);
            }
            PluginEventKind::ContentFailed { reason } => {
                tracing::warn!(plugin = %plugin, reason = %reason, "Plugin view failed");
                if let Some(record) = self.registry.get_mut(&plugin) {
                    record.state = PluginState::Failed {
                        reason: reason.clone(),
                    };
                }
                self.services.notify(
                    &format!("{} plugin failed to load: {}", plugin, reason),
                    NotifyLevel::Error,
                );
                self.coordinator.on_content_failed(&self.registry, &plugin);
            }
            PluginEventKind::TransitionRequested => match self.request_activate(&plugin) {
                Ok(activation) => {
                    tracing::trace!(plugin = %plugin, ?activation, "Transition handled");
                }
                Err(e) => {
                    tracing::warn!(plugin = %plugin, error = %e, "Transition request dropped");
                }
            },
            PluginEventKind::Message(message) => {
                let Some(record) = self.registry.get(&plugin) else {
                    tracing::warn!(
                        plugin = %plugin,
                        channel = %message.channel,
                        "Message from unregistered plugin dropped"
                    );
                    return;
                };
                self.router.dispatch(record.handle.as_ref(), message);
            }
            PluginEventKind::Console(message) => {
                log_console_message(&plugin, &message);
            }
        }
    }

    /// Clear the transition marker after a window elapsed
    pub fn handle_timer(&mut self, _elapsed: TransitionWindowElapsed) {
        self.coordinator.on_transition_window_elapsed();
    }

    /// Handle every queued event without waiting. Returns how many were
    /// processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        loop {
            if let Ok(elapsed) = self.timer_rx.try_recv() {
                self.handle_timer(elapsed);
                processed += 1;
                continue;
            }
            match self.events_rx.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    processed += 1;
                }
                Err(_) => break,
            }
        }
        processed
    }

    /// Handle events until `shutdown` is cancelled
    pub async fn run(&mut self, shutdown: CancellationToken) {
        tracing::debug!("Plugin event loop started");
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                Some(elapsed) = self.timer_rx.recv() => self.handle_timer(elapsed),
                Some(event) = self.events_rx.recv() => self.handle_event(event),
            }
        }
        tracing::debug!("Plugin event loop stopped");
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Name of the visible (or about to be visible) plugin
    pub fn active_plugin(&self) -> Option<&str> {
        self.coordinator.active()
    }

    /// Effective home plugin of this session
    pub fn home_plugin(&self) -> Option<&str> {
        self.home.as_deref()
    }

    /// Plugin names in activation order
    pub fn plugin_order(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn plugins(&self) -> Vec<PluginInfo> {
        let active = self.coordinator.active();
        self.registry
            .iter()
            .map(|record| PluginInfo {
                name: record.name.clone(),
                order: record.order,
                home: record.home,
                state: record.state.clone(),
                active: active == Some(record.name.as_str()),
                visible: record.handle.is_visible(),
            })
            .collect()
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Config snapshot of this session, including an adopted home plugin
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Change the home plugin for the next session. The running session
    /// keeps its home and active plugin.
    pub fn set_home_plugin(&mut self, name: Option<String>) {
        tracing::info!(plugin = ?name, "Home plugin changed, takes effect next session");
        self.config.home_plugin = name;
    }
}
