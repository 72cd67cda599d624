//! Invocation construction

use relint_core::AnalyzerConfig;
use std::path::Path;
use thiserror::Error;

/// Failure to turn configuration into an argv
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("command override is not shell-parseable: {0}")]
    BadOverride(String),
    #[error("extra args are not shell-parseable: {0}")]
    BadArgs(String),
    #[error("command override is empty")]
    EmptyOverride,
}

/// Build the argv for one analysis run
///
/// A full `command` override replaces the constructed invocation entirely,
/// with every `%s` substituted by the analyzed file path. Otherwise the
/// invocation is `<binary> analyse <file> --error-format=<fmt>
/// [--configuration <path>] [<extra args>...]`.
pub fn build_invocation(config: &AnalyzerConfig, file: &Path) -> Result<Vec<String>, InvocationError> {
    if let Some(command) = &config.command {
        let resolved = command.replace("%s", &file.to_string_lossy());
        let argv = shlex::split(&resolved).ok_or_else(|| InvocationError::BadOverride(resolved.clone()))?;
        if argv.is_empty() {
            return Err(InvocationError::EmptyOverride);
        }
        return Ok(argv);
    }

    let mut argv = vec![
        config.binary_path.clone(),
        "analyse".to_string(),
        file.to_string_lossy().into_owned(),
        format!("--error-format={}", config.error_format),
    ];

    if let Some(path) = &config.config {
        argv.push("--configuration".to_string());
        argv.push(path.to_string_lossy().into_owned());
    }

    if !config.args.trim().is_empty() {
        let extra = shlex::split(&config.args).ok_or_else(|| InvocationError::BadArgs(config.args.clone()))?;
        argv.extend(extra);
    }

    Ok(argv)
}
