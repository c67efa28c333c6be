//! Events emitted by plugin views
//!
//! Every handle gets its own [`PluginEventSender`], but all senders feed the
//! same shell-side queue. The queue is FIFO, so events from one plugin reach
//! the shell in the order the plugin emitted them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::console::ConsoleMessage;
use crate::error::PluginError;
use crate::message::InboundMessage;

/// What happened inside a plugin view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginEventKind {
    /// The view finished loading its content
    ContentReady,
    /// The view failed to load or crashed while rendering
    ContentFailed { reason: String },
    /// The user asked to switch to this plugin (e.g. clicked its sidebar button)
    TransitionRequested,
    /// The view sent a named message to the shell
    Message(InboundMessage),
    /// The view logged a console line
    Console(ConsoleMessage),
}

/// An event tagged with the plugin that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEvent {
    pub plugin: String,
    pub kind: PluginEventKind,
}

/// Create the shell-side event queue
pub fn event_channel() -> (
    mpsc::UnboundedSender<PluginEvent>,
    mpsc::UnboundedReceiver<PluginEvent>,
) {
    mpsc::unbounded_channel()
}

/// Per-plugin handle onto the shell's event queue
#[derive(Debug, Clone)]
pub struct PluginEventSender {
    plugin: String,
    tx: mpsc::UnboundedSender<PluginEvent>,
}

impl PluginEventSender {
    pub fn new(plugin: impl Into<String>, tx: mpsc::UnboundedSender<PluginEvent>) -> Self {
        Self {
            plugin: plugin.into(),
            tx,
        }
    }

    /// Name of the plugin this sender tags events with
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Emit a raw event kind
    pub fn emit(&self, kind: PluginEventKind) -> Result<(), PluginError> {
        self.tx
            .send(PluginEvent {
                plugin: self.plugin.clone(),
                kind,
            })
            .map_err(|_| PluginError::Disconnected(self.plugin.clone()))
    }

    pub fn content_ready(&self) -> Result<(), PluginError> {
        self.emit(PluginEventKind::ContentReady)
    }

    pub fn content_failed(&self, reason: impl Into<String>) -> Result<(), PluginError> {
        self.emit(PluginEventKind::ContentFailed {
            reason: reason.into(),
        })
    }

    pub fn transition_requested(&self) -> Result<(), PluginError> {
        self.emit(PluginEventKind::TransitionRequested)
    }

    /// Emit an inbound message on the named channel
    pub fn message(&self, channel: &str, args: Vec<Value>) -> Result<(), PluginError> {
        self.emit(PluginEventKind::Message(InboundMessage::new(
            self.plugin.clone(),
            channel,
            args,
        )))
    }

    pub fn console(
        &self,
        source_id: impl Into<String>,
        line: u32,
        message: impl Into<String>,
    ) -> Result<(), PluginError> {
        self.emit(PluginEventKind::Console(ConsoleMessage::new(
            source_id, line, message,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Channel;
    use serde_json::json;

    #[test]
    fn test_sender_tags_events_with_plugin_name() {
        let (tx, mut rx) = event_channel();
        let sender = PluginEventSender::new("Files", tx);

        sender.content_ready().unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.plugin, "Files");
        assert_eq!(event.kind, PluginEventKind::ContentReady);
    }

    #[test]
    fn test_events_arrive_in_emission_order() {
        let (tx, mut rx) = event_channel();
        let sender = PluginEventSender::new("Files", tx);

        sender.message("notify", vec![json!("first")]).unwrap();
        sender.transition_requested().unwrap();
        sender.message("notify", vec![json!("second")]).unwrap();

        let kinds: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds.len(), 3);
        assert!(matches!(&kinds[0], PluginEventKind::Message(m) if m.args[0] == json!("first")));
        assert_eq!(kinds[1], PluginEventKind::TransitionRequested);
        assert!(matches!(&kinds[2], PluginEventKind::Message(m) if m.args[0] == json!("second")));
    }

    #[test]
    fn test_message_builds_inbound_message() {
        let (tx, mut rx) = event_channel();
        let sender = PluginEventSender::new("Wallet", tx);

        sender
            .message("config", vec![json!({"get": "theme"}), json!("theme-reply")])
            .unwrap();

        match rx.try_recv().unwrap().kind {
            PluginEventKind::Message(msg) => {
                assert_eq!(msg.source_plugin, "Wallet");
                assert_eq!(msg.channel, Channel::Config);
                assert_eq!(msg.response_channel.as_deref(), Some("theme-reply"));
            }
            other => panic!("Expected Message, got {:?}", other),
        }
    }

    #[test]
    fn test_send_after_receiver_dropped_is_disconnected() {
        let (tx, rx) = event_channel();
        let sender = PluginEventSender::new("Files", tx);
        drop(rx);

        let err = sender.content_ready().unwrap_err();
        assert!(matches!(err, PluginError::Disconnected(name) if name == "Files"));
    }
}
