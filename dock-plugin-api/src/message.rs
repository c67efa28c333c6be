//! Inbound messages sent by plugin views to the shell

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Routing tag of an inbound message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Show a notification in the shell
    Notify,
    /// Show a tooltip positioned relative to the plugin view
    Tooltip,
    /// Get or set a value in the shell configuration
    Config,
    /// Toggle the plugin's own inspector
    Devtools,
    /// Anything the shell does not know how to route
    Other(String),
}

impl Channel {
    /// Wire name of the channel
    pub fn as_str(&self) -> &str {
        match self {
            Channel::Notify => "notify",
            Channel::Tooltip => "tooltip",
            Channel::Config => "config",
            Channel::Devtools => "devtools",
            Channel::Other(name) => name,
        }
    }
}

impl From<&str> for Channel {
    fn from(name: &str) -> Self {
        match name {
            "notify" => Channel::Notify,
            "tooltip" => Channel::Tooltip,
            "config" => Channel::Config,
            "devtools" => Channel::Devtools,
            other => Channel::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named message emitted by a plugin view
///
/// `args` are opaque to the transport; their meaning depends on the channel.
/// For `config` requests the second argument, when it is a string, names the
/// channel the reply is sent back on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Name of the plugin that sent the message
    pub source_plugin: String,
    /// Routing tag
    pub channel: Channel,
    /// Ordered message arguments
    pub args: Vec<Value>,
    /// Channel to reply on, if the sender asked for a reply
    pub response_channel: Option<String>,
}

impl InboundMessage {
    /// Build a message from its wire parts
    pub fn new(source_plugin: impl Into<String>, channel: &str, args: Vec<Value>) -> Self {
        let channel = Channel::from(channel);
        let response_channel = match channel {
            Channel::Config => args
                .get(1)
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            _ => None,
        };

        Self {
            source_plugin: source_plugin.into(),
            channel,
            args,
            response_channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_from_known_names() {
        assert_eq!(Channel::from("notify"), Channel::Notify);
        assert_eq!(Channel::from("tooltip"), Channel::Tooltip);
        assert_eq!(Channel::from("config"), Channel::Config);
        assert_eq!(Channel::from("devtools"), Channel::Devtools);
    }

    #[test]
    fn test_channel_unknown_keeps_name() {
        let channel = Channel::from("foo");
        assert_eq!(channel, Channel::Other("foo".to_string()));
        assert_eq!(channel.to_string(), "foo");
    }

    #[test]
    fn test_channel_names_are_case_sensitive() {
        assert!(matches!(Channel::from("Notify"), Channel::Other(_)));
    }

    #[test]
    fn test_config_message_extracts_response_channel() {
        let args = vec![json!({"get": "x"}), json!("resp-1")];
        let msg = InboundMessage::new("Files", "config", args);
        assert_eq!(msg.channel, Channel::Config);
        assert_eq!(msg.response_channel.as_deref(), Some("resp-1"));
    }

    #[test]
    fn test_config_message_without_response_channel() {
        let msg = InboundMessage::new("Files", "config", vec![json!({"get": "x"})]);
        assert!(msg.response_channel.is_none());

        let msg = InboundMessage::new("Files", "config", vec![json!({"get": "x"}), json!("")]);
        assert!(msg.response_channel.is_none());
    }

    #[test]
    fn test_notify_level_is_not_a_response_channel() {
        let msg = InboundMessage::new("Files", "notify", vec![json!("saved"), json!("success")]);
        assert!(msg.response_channel.is_none());
    }
}
