//! Core scheduling and diagnostic model for relint
//!
//! This crate provides:
//! - Trigger events as observed by the host editor
//! - Per-file tracking state (last analyzed / last modified)
//! - The skip-or-run scheduling policy
//! - Analyzer configuration and the diagnostic model
//!
//! Pure data and policy. No I/O, no async.

pub mod config;
pub mod diagnostic;
pub mod event;
pub mod sched;
pub mod track;

// Re-exports
pub use config::AnalyzerConfig;
pub use diagnostic::{Diagnostic, Severity, FULL_LINE_END_COL, SOURCE_TAG};
pub use event::{TriggerEvent, TriggerKind};
pub use sched::{SchedulingPolicy, SkipReason, DEBOUNCE_WINDOW_MS};
pub use track::{FileTrackingEntry, TrackingStore};

/// Get current wall-clock time in Unix milliseconds
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("System time before UNIX epoch")
        .as_millis() as u64
}
