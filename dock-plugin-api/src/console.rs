//! Console output captured from a plugin view

use serde::{Deserialize, Serialize};

/// One console line logged by a plugin's own scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Full path or URL of the script that logged the line
    pub source_id: String,
    /// Line number within the script
    pub line: u32,
    /// Logged text
    pub message: String,
}

impl ConsoleMessage {
    pub fn new(source_id: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            line,
            message: message.into(),
        }
    }

    /// Base name of the originating script.
    ///
    /// Strips everything up to the last `/` or `\`, so both URLs and Windows
    /// paths reduce to the file name.
    pub fn source_file(&self) -> &str {
        match self.source_id.rfind(['/', '\\']) {
            Some(idx) => &self.source_id[idx + 1..],
            None => &self.source_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_strips_unix_path() {
        let msg = ConsoleMessage::new("file:///opt/dock/plugins/Files/js/index.js", 12, "hi");
        assert_eq!(msg.source_file(), "index.js");
    }

    #[test]
    fn test_source_file_strips_windows_path() {
        let msg = ConsoleMessage::new(r"C:\dock\plugins\Files\js\main.js", 3, "hi");
        assert_eq!(msg.source_file(), "main.js");
    }

    #[test]
    fn test_source_file_without_separator() {
        let msg = ConsoleMessage::new("inline", 1, "hi");
        assert_eq!(msg.source_file(), "inline");
    }

    #[test]
    fn test_source_file_trailing_separator_is_empty() {
        let msg = ConsoleMessage::new("plugins/Files/", 1, "hi");
        assert_eq!(msg.source_file(), "");
    }
}
