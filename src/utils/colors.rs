//! Terminal colors and styling for CLI output.

use colored::Colorize;

/// Message type for different levels of output
#[derive(Debug, Clone, Copy)]
pub enum MessageType {
    Error,
}

impl MessageType {
    /// Apply color to a message based on its type
    pub fn colorize(&self, message: &str) -> String {
        match self {
            MessageType::Error => message.red().to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        match self {
            MessageType::Error => "✗",
        }
    }

    /// Format a message with prefix and color
    pub fn format(&self, message: &str) -> String {
        format!("{} {}", self.prefix(), self.colorize(message))
    }
}

/// Print a status line to stderr, keeping stdout for per-file reports.
pub fn status(kind: MessageType, message: &str) {
    eprintln!("{}", kind.format(message));
}
