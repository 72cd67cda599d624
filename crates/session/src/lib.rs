//! Analysis session: trigger handling, in-flight runs, diagnostic sink
//!
//! This crate provides:
//! - The per-file diagnostic sink with last-writer ordering
//! - The session actor: a single `handle(TriggerEvent)` entry point, spawned
//!   analyzer runs, and completions delivered back as discrete messages
//! - The session event stream the host renders (busy indicator, published
//!   and cleared diagnostics, skip and failure notices)

pub mod session;
pub mod sink;

// Re-exports
pub use session::{AnalysisSession, SessionEvent, SessionMessage};
pub use sink::DiagnosticSink;
