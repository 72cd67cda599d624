//! Analyze a single file and print its diagnostics

use crate::settings;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use relint_core::Diagnostic;
use relint_runner::AnalysisOutcome;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub async fn run(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(file.exists(), "No such file: {}", file.display());
    let file = file
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", file.display()))?;

    let root = settings::find_project_root(&file);
    let config = settings::load(config_path.as_deref(), root.as_deref())?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").expect("static template"));
    spinner.set_message(format!("Analyzing {}", file.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = relint_runner::execute(&file, &config, root.as_deref()).await;
    spinner.finish_and_clear();

    match outcome {
        AnalysisOutcome::Clean => {
            println!("{} {}", "No errors found in".green(), file.display());
            Ok(())
        }
        AnalysisOutcome::Findings(diagnostics) => {
            for diagnostic in &diagnostics {
                print_diagnostic(&file, diagnostic);
            }

            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            let warnings = diagnostics.len() - errors;
            println!();
            println!(
                "Found {} and {}",
                format!("{} error(s)", errors).red(),
                format!("{} warning(s)", warnings).yellow()
            );

            if errors > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
        AnalysisOutcome::ParseFailure { stdout, stderr, error } => {
            eprintln!("Stdout: {}", stdout);
            if !stderr.is_empty() {
                eprintln!("Stderr: {}", stderr);
            }
            anyhow::bail!("Failed to parse analyzer output: {}", error)
        }
        AnalysisOutcome::ProcessFailure { stderr, error } => {
            if !stderr.is_empty() {
                eprintln!("Stderr: {}", stderr);
            }
            anyhow::bail!("Analyzer failed: {}", error)
        }
    }
}

fn print_diagnostic(file: &Path, diagnostic: &Diagnostic) {
    // Lines print 1-based, as the tool reported them
    let line = diagnostic.line + 1;
    let severity = if diagnostic.is_error() {
        "error".red().to_string()
    } else {
        "warning".yellow().to_string()
    };
    let code = diagnostic
        .code
        .as_deref()
        .map(|code| format!(" [{}]", code.dimmed()))
        .unwrap_or_default();

    println!("{}:{}: {}: {}{}", file.display(), line, severity, diagnostic.message, code);
}
