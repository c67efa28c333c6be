//! Headless host that reports everything through tracing

use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use super::{HostLayout, HostServices, HostSurface, JsonConfigService, NotifyLevel};
use crate::error::HostError;

/// Host for running a session without a window
///
/// Notifications and tooltips become log lines; config requests go to a
/// [`JsonConfigService`].
pub struct TracingHost {
    layout: HostLayout,
    config: JsonConfigService,
    transitioning: AtomicBool,
}

impl TracingHost {
    pub fn new(layout: HostLayout, config: JsonConfigService) -> Self {
        Self {
            layout,
            config,
            transitioning: AtomicBool::new(false),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning.load(Ordering::SeqCst)
    }
}

impl HostServices for TracingHost {
    fn notify(&self, message: &str, level: NotifyLevel) {
        match level {
            NotifyLevel::Error => tracing::error!(severity = %level, "{}", message),
            NotifyLevel::Warning => tracing::warn!(severity = %level, "{}", message),
            NotifyLevel::Info | NotifyLevel::Success => {
                tracing::info!(severity = %level, "{}", message)
            }
        }
    }

    fn tooltip(&self, content: Value, position: Value) {
        tracing::debug!(content = %content, position = %position, "Tooltip");
    }

    fn config(&self, request: Value) -> Result<Value, HostError> {
        self.config.handle(&request)
    }
}

impl HostSurface for TracingHost {
    fn header_height(&self) -> f64 {
        self.layout.header_height
    }

    fn sidebar_width(&self) -> f64 {
        self.layout.sidebar_width
    }

    fn set_transitioning(&self, active: bool) {
        self.transitioning.store(active, Ordering::SeqCst);
        tracing::trace!(active, "Transition marker");
    }
}
