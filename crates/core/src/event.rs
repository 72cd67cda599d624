//! Trigger events observed by the host editor

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the host observed to raise a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Document was opened
    Opened,
    /// Active editor switched to the document
    ActiveChanged,
    /// Document was saved
    Saved,
    /// Explicit re-check requested by the user
    ManuallyTriggered,
    /// Document was already open when the session started
    InitialActive,
}

impl TriggerKind {
    /// Label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            TriggerKind::Opened => "opened document",
            TriggerKind::ActiveChanged => "changed active editor",
            TriggerKind::Saved => "saved document",
            TriggerKind::ManuallyTriggered => "manual analyze",
            TriggerKind::InitialActive => "initially active document",
        }
    }
}

/// A discrete event that may initiate analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Kind of trigger the host observed
    pub kind: TriggerKind,
    /// File the trigger concerns
    pub file: PathBuf,
    /// Editor-reported unsaved-changes flag
    pub is_dirty: bool,
    /// When the trigger was observed (Unix milliseconds)
    pub observed_at: u64,
}

impl TriggerEvent {
    /// Create a new trigger event
    pub fn new(kind: TriggerKind, file: impl Into<PathBuf>, is_dirty: bool, observed_at: u64) -> Self {
        Self {
            kind,
            file: file.into(),
            is_dirty,
            observed_at,
        }
    }
}
