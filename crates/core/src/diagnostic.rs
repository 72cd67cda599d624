//! Positioned, severity-tagged findings attached to a file

use serde::{Deserialize, Serialize};

/// Source tag attached to every diagnostic
pub const SOURCE_TAG: &str = "phpstan";

/// End-column sentinel for a full-line span
///
/// PHPStan reports lines without columns, so every diagnostic spans the
/// whole line from column 0 up to this sentinel.
pub const FULL_LINE_END_COL: u32 = 1000;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding attached to a file for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 0-based line the finding spans
    pub line: u32,
    /// Start column (always 0)
    pub start_col: u32,
    /// End column (full-line sentinel)
    pub end_col: u32,
    /// Finding text as reported by the tool
    pub message: String,
    /// Severity derived from the tool's ignorable flag
    pub severity: Severity,
    /// Producing tool
    pub source: String,
    /// Optional rule identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    /// Build a full-line diagnostic from a 1-based tool-reported line
    pub fn from_reported(line: u32, message: impl Into<String>, severity: Severity, code: Option<String>) -> Self {
        Self {
            line: line.saturating_sub(1),
            start_col: 0,
            end_col: FULL_LINE_END_COL,
            message: message.into(),
            severity,
            source: SOURCE_TAG.to_string(),
            code,
        }
    }

    /// Whether this diagnostic is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
