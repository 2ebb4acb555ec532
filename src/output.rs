//! Output formatting for human and JSON modes
//!
//! Commands either print a text rendering or the raw API response as pretty
//! JSON, unchanged and in the server's key order.

use serde_json::Value;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Render a response in the given mode
///
/// `human` is only invoked in [`OutputMode::Human`].
#[must_use]
pub fn render(value: &Value, mode: OutputMode, human: impl FnOnce(&Value) -> String) -> String {
    match mode {
        OutputMode::Human => human(value),
        OutputMode::Json => to_json(value),
    }
}

/// Pretty-print a JSON value with two-space indentation
#[must_use]
pub fn to_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// A single status line for an action that completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionStatus(pub String);

impl ActionStatus {
    /// Render as a bullet line
    #[must_use]
    pub fn line(&self) -> String {
        format!("- {}", self.0)
    }

    /// Print to stdout
    pub fn print(&self) {
        println!("{}", self.line());
    }
}
