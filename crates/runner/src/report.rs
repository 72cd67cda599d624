//! Analyzer JSON report parsing
//!
//! Models the shape produced by `--error-format=json`: a mapping from
//! analyzed-file path to a per-file report with an ordered message list.
//! Only the fields the mapper consumes are modeled; totals and project-level
//! errors are ignored.

use relint_core::{Diagnostic, Severity};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    files: HashMap<String, FileReport>,
}

#[derive(Debug, Deserialize)]
struct FileReport {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    line: u32,
    message: String,
    #[serde(default)]
    ignorable: bool,
    #[serde(default)]
    identifier: Option<String>,
}

/// Map the report entry for `file` into diagnostics
///
/// Other files present in a batch report are ignored. A report with no entry
/// for the file yields an empty sequence: the tool had nothing to say about
/// it, which is the clean-run case rather than an error. Malformed stdout is
/// the caller's parse-failure path; the raw payload stays with the caller.
pub fn parse_report(stdout: &str, file: &Path) -> Result<Vec<Diagnostic>, serde_json::Error> {
    let report: Report = serde_json::from_str(stdout)?;

    let key = file.to_string_lossy();
    let Some(entry) = report.files.get(key.as_ref()) else {
        return Ok(Vec::new());
    };

    Ok(entry
        .messages
        .iter()
        .map(|msg| {
            let severity = if msg.ignorable { Severity::Warning } else { Severity::Error };
            Diagnostic::from_reported(msg.line, msg.message.clone(), severity, msg.identifier.clone())
        })
        .collect())
}
