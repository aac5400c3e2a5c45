//! Rendering configuration for error context descriptions.

use serde::{Deserialize, Serialize};

/// Line separator used by the running platform.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Line separator used by the running platform.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Controls how a [`Frame`](crate::context::Frame) is turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Separator written before every section.
    #[serde(default = "default_line_separator")]
    pub line_separator: String,
    /// Whether statement text is collapsed onto a single line.
    #[serde(default = "default_normalize_sql")]
    pub normalize_sql: bool,
}

fn default_line_separator() -> String {
    LINE_SEPARATOR.to_string()
}

fn default_normalize_sql() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_separator: default_line_separator(),
            normalize_sql: default_normalize_sql(),
        }
    }
}

impl RenderConfig {
    /// Creates a render configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line separator.
    #[must_use]
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Enables or disables statement normalization.
    #[must_use]
    pub fn with_sql_normalization(mut self, enabled: bool) -> Self {
        self.normalize_sql = enabled;
        self
    }
}
