//! Analyzer invocation configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recognized configuration surface for the analyzer invocation
///
/// Loaded from `relint.toml` by the CLI. Every field has a default, so an
/// absent file yields a usable configuration that resolves `phpstan` via the
/// search path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Analyzer binary, resolved via PATH when not absolute
    pub binary_path: String,
    /// Optional analyzer configuration file, passed as `--configuration`
    pub config: Option<PathBuf>,
    /// Extra arguments appended verbatim to the invocation
    pub args: String,
    /// Report format requested from the tool
    pub error_format: String,
    /// Full invocation override
    ///
    /// When set, replaces the constructed invocation entirely; `%s`
    /// occurrences are substituted with the analyzed file path.
    pub command: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            binary_path: "phpstan".to_string(),
            config: None,
            args: String::new(),
            error_format: "json".to_string(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.binary_path, "phpstan");
        assert_eq!(config.error_format, "json");
        assert!(config.config.is_none());
        assert!(config.command.is_none());
        assert!(config.args.is_empty());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: AnalyzerConfig = serde_json::from_str(r#"{"binary_path": "/opt/phpstan"}"#).unwrap();
        assert_eq!(config.binary_path, "/opt/phpstan");
        assert_eq!(config.error_format, "json");
    }
}
