//! Analyzer process execution and report mapping
//!
//! This crate provides:
//! - Invocation construction from [`relint_core::AnalyzerConfig`]
//! - External process execution (exactly one process per run)
//! - JSON report parsing into per-file diagnostics
//! - Outcome classification under the analyzer's exit-code convention

pub mod invoke;
pub mod process;
pub mod report;

// Re-exports
pub use invoke::{build_invocation, InvocationError};
pub use process::{execute, AnalysisOutcome};
pub use report::parse_report;
