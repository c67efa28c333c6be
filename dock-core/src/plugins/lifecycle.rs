//! LifecycleCoordinator - keeps one plugin visible and drives transitions
//!
//! The coordinator is the only writer of the active selection. A switch
//! hides the previous plugin before showing the next one, so at most one
//! view is visible at any instant.
//!
//! Each switch opens a transition window: the host surface gets a marker
//! (used for the fade) that a timer clears when the window elapses. The
//! timer is never cancelled; overlapping switches are prevented by the
//! busy guard in [`LifecycleCoordinator::request_activate`] instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::registry::{PluginRegistry, PluginState};
use crate::config::DEFAULT_TRANSITION_WINDOW;
use crate::error::ManagerError;
use crate::host::HostSurface;

/// Fired when a transition window has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionWindowElapsed;

/// Result of an activation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The target is now the active plugin
    Switched { from: Option<String>, to: String },
    /// The target was already active
    AlreadyActive,
    /// The active plugin is still loading; nothing changed
    Busy { active: String },
    /// The target's view failed; nothing changed
    Unavailable { reason: String },
}

pub struct LifecycleCoordinator {
    surface: Arc<dyn HostSurface>,
    transition_window: Duration,
    timer_tx: mpsc::UnboundedSender<TransitionWindowElapsed>,
    active: Option<String>,
    home: Option<String>,
    home_shown: bool,
}

impl LifecycleCoordinator {
    pub fn new(
        surface: Arc<dyn HostSurface>,
        timer_tx: mpsc::UnboundedSender<TransitionWindowElapsed>,
    ) -> Self {
        Self {
            surface,
            transition_window: DEFAULT_TRANSITION_WINDOW,
            timer_tx,
            active: None,
            home: None,
            home_shown: false,
        }
    }

    pub fn set_transition_window(&mut self, window: Duration) {
        self.transition_window = window;
    }

    pub fn transition_window(&self) -> Duration {
        self.transition_window
    }

    /// Name of the active plugin
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Make `name` the initial selection.
    ///
    /// The home view is shown when it reports content-ready. Only the first
    /// bound home counts for the session.
    pub fn bind_home(&mut self, name: &str) {
        if self.home.is_some() {
            tracing::warn!(plugin = %name, "Home plugin already bound, ignoring");
            return;
        }
        self.home = Some(name.to_string());
        if self.active.is_none() {
            self.active = Some(name.to_string());
        }
    }

    /// React to a view reporting content-ready
    pub fn on_content_ready(&mut self, registry: &PluginRegistry, name: &str) {
        if self.home_shown || self.home.as_deref() != Some(name) {
            return;
        }
        self.home_shown = true;

        // The user may already have switched away while home was loading
        if self.active.as_deref() == Some(name)
            && let Some(record) = registry.get(name)
        {
            tracing::info!(plugin = %name, "Showing home plugin");
            record.handle.show();
        }
    }

    /// React to a view reporting a load or render failure.
    ///
    /// A failed active plugin is hidden and the selection cleared, so the
    /// selection never points at a dead view.
    pub fn on_content_failed(&mut self, registry: &PluginRegistry, name: &str) {
        if self.active.as_deref() != Some(name) {
            return;
        }
        if let Some(record) = registry.get(name) {
            record.handle.hide();
        }
        tracing::warn!(plugin = %name, "Active plugin failed, clearing selection");
        self.active = None;
    }

    /// Switch the visible plugin to `target`.
    ///
    /// Requesting a plugin that is not registered is a caller error.
    pub fn request_activate(
        &mut self,
        registry: &PluginRegistry,
        target: &str,
    ) -> Result<Activation, ManagerError> {
        let record = registry
            .get(target)
            .ok_or_else(|| ManagerError::UnknownPlugin {
                name: target.to_string(),
            })?;

        if self.active.as_deref() == Some(target) {
            return Ok(Activation::AlreadyActive);
        }

        let previous = self.active.as_deref().and_then(|name| registry.get(name));
        if let Some(current) = previous
            && current.handle.is_loading()
        {
            tracing::debug!(
                active = %current.name,
                target = %target,
                "Active plugin busy, ignoring switch"
            );
            return Ok(Activation::Busy {
                active: current.name.clone(),
            });
        }

        if let PluginState::Failed { reason } = &record.state {
            tracing::warn!(plugin = %target, reason = %reason, "Refusing to show failed plugin");
            return Ok(Activation::Unavailable {
                reason: reason.clone(),
            });
        }

        self.open_transition_window();

        if let Some(current) = previous {
            current.handle.hide();
        }
        let from = self.active.replace(target.to_string());
        record.handle.show();

        tracing::debug!(from = ?from, to = %target, "Switched plugin");
        Ok(Activation::Switched {
            from,
            to: target.to_string(),
        })
    }

    /// Clear the transition marker when a window elapses
    pub fn on_transition_window_elapsed(&mut self) {
        self.surface.set_transitioning(false);
    }

    fn open_transition_window(&self) {
        self.surface.set_transitioning(true);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime for transition timer, clearing marker now");
            self.surface.set_transitioning(false);
            return;
        };

        let window = self.transition_window;
        let tx = self.timer_tx.clone();
        runtime.spawn(async move {
            tokio::time::sleep(window).await;
            // The manager may be gone at shutdown
            let _ = tx.send(TransitionWindowElapsed);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use crate::plugins::mock::MockPluginHandle;
    use crate::plugins::registry::PluginRecord;
    use dock_plugin_api::PluginHandle;

    struct Fixture {
        coordinator: LifecycleCoordinator,
        registry: PluginRegistry,
        handles: Vec<Arc<MockPluginHandle>>,
        host: Arc<RecordingHost>,
        timer_rx: mpsc::UnboundedReceiver<TransitionWindowElapsed>,
    }

    impl Fixture {
        fn handle(&self, name: &str) -> &Arc<MockPluginHandle> {
            self.handles.iter().find(|h| h.name() == name).unwrap()
        }
    }

    /// Registry with the given plugins, all loaded, the first bound as home
    fn fixture(names: &[&str]) -> Fixture {
        let host = Arc::new(RecordingHost::new());
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let mut coordinator = LifecycleCoordinator::new(host.clone(), timer_tx);
        let mut registry = PluginRegistry::new();
        let mut handles = Vec::new();

        for (order, name) in names.iter().enumerate() {
            let handle = Arc::new(MockPluginHandle::detached(*name));
            handle.set_loading(false);
            registry.insert(PluginRecord {
                name: name.to_string(),
                handle: handle.clone(),
                order,
                home: order == 0,
                state: PluginState::Ready,
            });
            handles.push(handle);
        }
        if let Some(first) = names.first() {
            coordinator.bind_home(first);
        }

        Fixture {
            coordinator,
            registry,
            handles,
            host,
            timer_rx,
        }
    }

    #[tokio::test]
    async fn test_bind_home_sets_selection_and_shows_on_ready() {
        let mut f = fixture(&["Files", "Wallet"]);
        assert_eq!(f.coordinator.active(), Some("Files"));
        assert!(!f.handle("Files").is_visible());

        f.coordinator.on_content_ready(&f.registry, "Files");
        assert!(f.handle("Files").is_visible());
        assert_eq!(f.registry.visible_count(), 1);
    }

    #[tokio::test]
    async fn test_home_shown_only_once() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.coordinator.on_content_ready(&f.registry, "Files");
        f.coordinator.on_content_ready(&f.registry, "Files");
        assert_eq!(f.handle("Files").show_count(), 1);
    }

    #[tokio::test]
    async fn test_content_ready_of_other_plugin_shows_nothing() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.coordinator.on_content_ready(&f.registry, "Wallet");
        assert_eq!(f.registry.visible_count(), 0);
    }

    #[tokio::test]
    async fn test_request_activate_switches_views() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.coordinator.on_content_ready(&f.registry, "Files");

        let result = f.coordinator.request_activate(&f.registry, "Wallet").unwrap();

        assert_eq!(
            result,
            Activation::Switched {
                from: Some("Files".to_string()),
                to: "Wallet".to_string()
            }
        );
        assert_eq!(f.coordinator.active(), Some("Wallet"));
        assert!(!f.handle("Files").is_visible());
        assert!(f.handle("Wallet").is_visible());
    }

    #[tokio::test]
    async fn test_request_activate_same_target_is_noop() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.coordinator.on_content_ready(&f.registry, "Files");
        f.coordinator.request_activate(&f.registry, "Wallet").unwrap();

        let result = f.coordinator.request_activate(&f.registry, "Wallet").unwrap();

        assert_eq!(result, Activation::AlreadyActive);
        assert_eq!(f.handle("Wallet").show_count(), 1);
    }

    #[tokio::test]
    async fn test_request_activate_while_active_loading_is_noop() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.handle("Files").set_loading(true);

        let result = f.coordinator.request_activate(&f.registry, "Wallet").unwrap();

        assert_eq!(
            result,
            Activation::Busy {
                active: "Files".to_string()
            }
        );
        assert_eq!(f.coordinator.active(), Some("Files"));
        assert!(f.host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_request_activate_unknown_plugin_is_error() {
        let mut f = fixture(&["Files"]);

        let err = f.coordinator.request_activate(&f.registry, "Hosting").unwrap_err();

        assert!(matches!(err, ManagerError::UnknownPlugin { name } if name == "Hosting"));
        assert_eq!(f.coordinator.active(), Some("Files"));
    }

    #[tokio::test]
    async fn test_failed_active_plugin_clears_selection() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.coordinator.on_content_ready(&f.registry, "Files");

        f.coordinator.on_content_failed(&f.registry, "Files");

        assert_eq!(f.coordinator.active(), None);
        assert_eq!(f.registry.visible_count(), 0);

        // Nothing to hide, so the next switch goes straight through
        let result = f.coordinator.request_activate(&f.registry, "Wallet").unwrap();
        assert_eq!(
            result,
            Activation::Switched {
                from: None,
                to: "Wallet".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_failed_target_is_unavailable() {
        let mut f = fixture(&["Files", "Wallet"]);
        if let Some(record) = f.registry.get_mut("Wallet") {
            record.state = PluginState::Failed {
                reason: "crashed".to_string(),
            };
        }

        let result = f.coordinator.request_activate(&f.registry, "Wallet").unwrap();

        assert!(matches!(result, Activation::Unavailable { .. }));
        assert_eq!(f.coordinator.active(), Some("Files"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_window_sets_and_clears_marker() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.coordinator.on_content_ready(&f.registry, "Files");

        f.coordinator.request_activate(&f.registry, "Wallet").unwrap();
        assert!(f.host.is_transitioning());

        let elapsed = f.timer_rx.recv().await;
        assert_eq!(elapsed, Some(TransitionWindowElapsed));

        f.coordinator.on_transition_window_elapsed();
        assert!(!f.host.is_transitioning());
        assert_eq!(
            f.host.calls(),
            vec![HostCall::Transitioning(true), HostCall::Transitioning(false)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_timer_waits_for_window() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.coordinator.set_transition_window(Duration::from_millis(500));
        f.coordinator.on_content_ready(&f.registry, "Files");

        let start = tokio::time::Instant::now();
        f.coordinator.request_activate(&f.registry, "Wallet").unwrap();
        f.timer_rx.recv().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_without_runtime_marker_clears_immediately() {
        let mut f = fixture(&["Files", "Wallet"]);
        f.handle("Files").set_loading(false);

        f.coordinator.request_activate(&f.registry, "Wallet").unwrap();

        assert!(!f.host.is_transitioning());
        assert!(f.timer_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_random_activation_sequence_keeps_one_visible() {
        let names = ["Files", "Wallet", "Hosting", "About"];
        let mut f = fixture(&names);
        f.coordinator.on_content_ready(&f.registry, "Files");

        // Deterministic pseudo-random walk, including repeats
        let mut seed: u32 = 7;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let target = names[(seed >> 16) as usize % names.len()];
            f.coordinator.request_activate(&f.registry, target).unwrap();

            assert_eq!(f.registry.visible_count(), 1);
            assert_eq!(f.coordinator.active(), Some(target));
            assert!(f.handle(target).is_visible());
        }
    }
}
