//! The message line at the bottom of the screen.
//!
//! Stores one transient notice for the renderer to draw. When disabled by
//! configuration every call is a no-op.

use tracing::debug;

/// Prefix for library warnings.
const WARNING_PREFIX: &str = "Library error: ";

/// Somewhere to surface user-visible notices.
pub trait DiagnosticSink {
    /// Show a notice, replacing the previous one.
    fn notice(&mut self, message: &str);
}

/// The latest notice for the bottom line of the screen.
#[derive(Debug, Clone)]
pub struct MessageLine {
    enabled: bool,
    message: String,
}

impl MessageLine {
    /// Create a message line.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            message: String::new(),
        }
    }

    /// Whether the message line is shown at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the current message.
    pub fn set(&mut self, message: &str) {
        if !self.enabled {
            return;
        }
        self.message.clear();
        self.message.push_str(message);
        debug!(message, "Message line updated");
    }

    /// Show a library warning.
    pub fn warning(&mut self, message: &str) {
        if !self.enabled {
            return;
        }
        self.set(&format!("{}{}", WARNING_PREFIX, message));
    }

    /// Blank the line.
    pub fn clear(&mut self) {
        self.message.clear();
    }

    /// The message currently shown; empty when blank.
    pub fn current(&self) -> &str {
        &self.message
    }
}

impl Default for MessageLine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DiagnosticSink for MessageLine {
    fn notice(&mut self, message: &str) {
        self.set(message);
    }
}

impl DiagnosticSink for Vec<String> {
    fn notice(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_message() {
        let mut line = MessageLine::default();
        assert_eq!(line.current(), "");
        line.set("first");
        line.set("second");
        assert_eq!(line.current(), "second");
        line.clear();
        assert_eq!(line.current(), "");
    }

    #[test]
    fn test_warning_prefix() {
        let mut line = MessageLine::new(true);
        line.warning("bad window");
        assert_eq!(line.current(), "Library error: bad window");
    }

    #[test]
    fn test_disabled_line_ignores_everything() {
        let mut line = MessageLine::new(false);
        assert!(!line.is_enabled());
        line.notice("hello");
        line.warning("oops");
        assert_eq!(line.current(), "");
    }

    #[test]
    fn test_vec_sink_records_notices() {
        let mut sink: Vec<String> = Vec::new();
        sink.notice("one");
        sink.notice("two");
        assert_eq!(sink, vec!["one".to_string(), "two".to_string()]);
    }
}
