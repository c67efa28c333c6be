//! MessageRouter - dispatches plugin messages to host services
//!
//! | channel    | action                                                        |
//! |------------|---------------------------------------------------------------|
//! | `notify`   | forward to the notification service                           |
//! | `tooltip`  | translate the position into shell coordinates, then forward   |
//! | `config`   | run the request, reply on the response channel if one is set  |
//! | `devtools` | toggle the sender's inspector                                 |
//! | other      | report an unknown message through the notification service    |

use std::sync::Arc;

use dock_plugin_api::{Channel, InboundMessage, PluginHandle};
use serde_json::Value;

use crate::host::{HostServices, HostSurface, NotifyLevel};

/// What the router did with a message
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Notified,
    TooltipShown,
    /// Config request handled; `replied` is true when a reply was sent back
    Config { replied: bool },
    DevtoolsToggled,
    /// Unknown channel, reported and discarded
    Unknown { channel: String },
    /// Known channel with unusable arguments, reported and discarded
    Rejected { reason: String },
}

pub struct MessageRouter {
    services: Arc<dyn HostServices>,
    surface: Arc<dyn HostSurface>,
}

impl MessageRouter {
    pub fn new(services: Arc<dyn HostServices>, surface: Arc<dyn HostSurface>) -> Self {
        Self { services, surface }
    }

    /// Dispatch one message from `handle` to exactly one host action
    pub fn dispatch(&self, handle: &dyn PluginHandle, message: InboundMessage) -> RouteOutcome {
        tracing::trace!(
            plugin = %message.source_plugin,
            channel = %message.channel,
            args = message.args.len(),
            "Routing plugin message"
        );

        let outcome = match message.channel {
            Channel::Notify => self.route_notify(message.args),
            Channel::Tooltip => self.route_tooltip(message.args),
            Channel::Config => self.route_config(handle, message.args, message.response_channel),
            Channel::Devtools => {
                handle.toggle_dev_tools();
                RouteOutcome::DevtoolsToggled
            }
            Channel::Other(channel) => {
                self.services
                    .notify(&format!("Unknown ipc message: {channel}"), NotifyLevel::Error);
                RouteOutcome::Unknown { channel }
            }
        };

        if let RouteOutcome::Rejected { reason } = &outcome {
            tracing::warn!(
                plugin = %message.source_plugin,
                reason = %reason,
                "Plugin message rejected"
            );
            self.services.notify(
                &format!("Bad message from {} plugin: {}", message.source_plugin, reason),
                NotifyLevel::Error,
            );
        }

        outcome
    }

    fn route_notify(&self, args: Vec<Value>) -> RouteOutcome {
        let Some(first) = args.first() else {
            return RouteOutcome::Rejected {
                reason: "notify needs a message".to_string(),
            };
        };

        let message = match first {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let level = args
            .get(1)
            .and_then(Value::as_str)
            .and_then(NotifyLevel::parse)
            .unwrap_or_default();

        self.services.notify(&message, level);
        RouteOutcome::Notified
    }

    fn route_tooltip(&self, mut args: Vec<Value>) -> RouteOutcome {
        if args.len() < 2 {
            return RouteOutcome::Rejected {
                reason: "tooltip needs content and a position".to_string(),
            };
        }

        let mut position = args.remove(1);
        let content = args.remove(0);

        let Some(fields) = position.as_object_mut() else {
            return RouteOutcome::Rejected {
                reason: "tooltip position must be an object".to_string(),
            };
        };

        // Plugin-local coordinates to shell coordinates
        let top = fields
            .get("top")
            .and_then(|top| offset_coordinate(top, self.surface.header_height()));
        let left = fields
            .get("left")
            .and_then(|left| offset_coordinate(left, self.surface.sidebar_width()));
        let (Some(top), Some(left)) = (top, left) else {
            return RouteOutcome::Rejected {
                reason: "tooltip position needs numeric top and left".to_string(),
            };
        };
        fields.insert("top".to_string(), top);
        fields.insert("left".to_string(), left);

        self.services.tooltip(content, position);
        RouteOutcome::TooltipShown
    }

    fn route_config(
        &self,
        handle: &dyn PluginHandle,
        mut args: Vec<Value>,
        response_channel: Option<String>,
    ) -> RouteOutcome {
        if args.is_empty() {
            return RouteOutcome::Rejected {
                reason: "config needs a request".to_string(),
            };
        }
        let request = args.swap_remove(0);

        let result = match self.services.config(request) {
            Ok(result) => result,
            Err(e) => {
                return RouteOutcome::Rejected {
                    reason: e.to_string(),
                };
            }
        };

        let Some(channel) = response_channel else {
            return RouteOutcome::Config { replied: false };
        };

        match handle.send_to_view(&channel, result) {
            Ok(()) => RouteOutcome::Config { replied: true },
            Err(e) => {
                tracing::warn!(
                    plugin = %handle.name(),
                    channel = %channel,
                    error = %e,
                    "Failed to deliver config reply"
                );
                RouteOutcome::Config { replied: false }
            }
        }
    }
}

/// Shift a coordinate by a layout offset. Integers stay integers when the
/// offset is whole; anything that is not a number yields `None`.
fn offset_coordinate(value: &Value, offset: f64) -> Option<Value> {
    if let Some(n) = value.as_i64()
        && offset.fract() == 0.0
        && offset.abs() < i64::MAX as f64
    {
        return Some(Value::from(n.saturating_add(offset as i64)));
    }
    let shifted = value.as_f64()? + offset;
    shifted.is_finite().then_some(Value::from(shifted))
}
