//! External analyzer process execution and outcome classification

use crate::invoke::build_invocation;
use crate::report::parse_report;
use relint_core::{AnalyzerConfig, Diagnostic};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Result of one completed analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Clean run: the file's diagnostic set clears
    Clean,
    /// The tool reported at least one message for the file
    Findings(Vec<Diagnostic>),
    /// Stdout present but not a valid report; prior diagnostics stay valid
    ParseFailure {
        stdout: String,
        stderr: String,
        error: String,
    },
    /// Binary missing, crashed, or non-zero exit without stdout; prior
    /// diagnostics stay valid
    ProcessFailure {
        stderr: String,
        error: String,
    },
}

/// Execute one analysis run for `file`
///
/// Spawns exactly one external process per call. The analyzer exits non-zero
/// whenever it reports findings, so a non-zero exit with stdout is the normal
/// findings path, a non-zero exit without stdout is a genuine process
/// failure, and a zero exit is the clean path.
pub async fn execute(file: &Path, config: &AnalyzerConfig, workdir: Option<&Path>) -> AnalysisOutcome {
    let argv = match build_invocation(config, file) {
        Ok(argv) => argv,
        Err(err) => {
            return AnalysisOutcome::ProcessFailure {
                stderr: String::new(),
                error: err.to_string(),
            }
        }
    };

    debug!(file = %file.display(), command = %argv.join(" "), "spawning analyzer");

    let mut command = Command::new(&argv[0]);
    command
        .args(&argv[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = workdir {
        command.current_dir(dir);
    }

    let output = match command.output().await {
        Ok(output) => output,
        Err(err) => {
            return AnalysisOutcome::ProcessFailure {
                stderr: String::new(),
                error: format!("failed to spawn {}: {}", argv[0], err),
            }
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    classify(file, output.status.success(), stdout, stderr)
}

/// Classify captured output under the analyzer's exit-code convention
fn classify(file: &Path, clean_exit: bool, stdout: String, stderr: String) -> AnalysisOutcome {
    if clean_exit {
        return AnalysisOutcome::Clean;
    }

    if stdout.trim().is_empty() {
        return AnalysisOutcome::ProcessFailure {
            stderr,
            error: "analyzer exited non-zero with no output".to_string(),
        };
    }

    match parse_report(&stdout, file) {
        // A parsed report with no messages for the file is a clean run
        Ok(diagnostics) if diagnostics.is_empty() => AnalysisOutcome::Clean,
        Ok(diagnostics) => AnalysisOutcome::Findings(diagnostics),
        Err(err) => AnalysisOutcome::ParseFailure {
            stdout,
            stderr,
            error: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relint_core::Severity;

    fn sh_override(script: &str) -> AnalyzerConfig {
        AnalyzerConfig {
            command: Some(format!("sh -c \"{}\"", script)),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_zero_exit_is_clean() {
        let outcome = classify(Path::new("/a.php"), true, String::new(), String::new());
        assert_eq!(outcome, AnalysisOutcome::Clean);
    }

    #[test]
    fn test_classify_nonzero_without_stdout_is_process_failure() {
        let outcome = classify(Path::new("/a.php"), false, "  \n".to_string(), "boom".to_string());
        assert!(matches!(outcome, AnalysisOutcome::ProcessFailure { ref stderr, .. } if stderr == "boom"));
    }

    #[test]
    fn test_classify_nonzero_with_findings() {
        let stdout = r#"{"files": {"/a.php": {"messages": [{"line": 5, "message": "x"}]}}}"#;
        let outcome = classify(Path::new("/a.php"), false, stdout.to_string(), String::new());
        match outcome {
            AnalysisOutcome::Findings(diagnostics) => {
                assert_eq!(diagnostics.len(), 1);
                assert_eq!(diagnostics[0].severity, Severity::Error);
            }
            other => panic!("expected findings, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_report_without_entry_for_file_is_clean() {
        let stdout = r#"{"files": {"/other.php": {"messages": [{"line": 1, "message": "x"}]}}}"#;
        let outcome = classify(Path::new("/a.php"), false, stdout.to_string(), String::new());
        assert_eq!(outcome, AnalysisOutcome::Clean);
    }

    #[test]
    fn test_classify_malformed_stdout_preserves_raw_payload() {
        let outcome = classify(
            Path::new("/a.php"),
            false,
            "PHP Fatal error: out of memory".to_string(),
            "trace".to_string(),
        );
        match outcome {
            AnalysisOutcome::ParseFailure { stdout, stderr, .. } => {
                assert_eq!(stdout, "PHP Fatal error: out of memory");
                assert_eq!(stderr, "trace");
            }
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_missing_binary_is_process_failure() {
        let config = AnalyzerConfig {
            binary_path: "/nonexistent/phpstan-binary".to_string(),
            ..Default::default()
        };
        let outcome = execute(Path::new("/a.php"), &config, None).await;
        assert!(matches!(outcome, AnalysisOutcome::ProcessFailure { .. }));
    }

    #[tokio::test]
    async fn test_execute_clean_exit() {
        let outcome = execute(Path::new("/a.php"), &sh_override("exit 0"), None).await;
        assert_eq!(outcome, AnalysisOutcome::Clean);
    }

    #[tokio::test]
    async fn test_execute_nonzero_without_stdout() {
        let outcome = execute(Path::new("/a.php"), &sh_override("echo oops >&2; exit 1"), None).await;
        match outcome {
            AnalysisOutcome::ProcessFailure { stderr, .. } => assert_eq!(stderr.trim(), "oops"),
            other => panic!("expected process failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_findings_through_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.php");
        std::fs::write(&target, "<?php\n").unwrap();

        let report = serde_json::json!({
            "totals": {"errors": 0, "file_errors": 1},
            "files": {
                target.to_string_lossy(): {
                    "errors": 1,
                    "messages": [{"line": 2, "message": "Undefined variable", "ignorable": false}]
                }
            },
            "errors": []
        });
        let report_path = dir.path().join("report.json");
        std::fs::write(&report_path, report.to_string()).unwrap();

        let config = sh_override(&format!("cat {}; exit 1", report_path.display()));
        let outcome = execute(&target, &config, Some(dir.path())).await;

        match outcome {
            AnalysisOutcome::Findings(diagnostics) => {
                assert_eq!(diagnostics.len(), 1);
                assert_eq!(diagnostics[0].line, 1);
                assert_eq!(diagnostics[0].message, "Undefined variable");
            }
            other => panic!("expected findings, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_respects_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.json"), r#"{"files": {}}"#).unwrap();

        // Relative path only resolves if the working directory was applied
        let config = sh_override("cat report.json; exit 1");
        let outcome = execute(Path::new("/a.php"), &config, Some(dir.path())).await;
        assert_eq!(outcome, AnalysisOutcome::Clean);
    }
}
