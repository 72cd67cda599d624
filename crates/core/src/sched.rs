//! Skip-or-run scheduling policy
//!
//! Two suppression rules bound redundant analysis:
//! 1. Global debounce: the same file is never analyzed twice within the
//!    debounce window, regardless of trigger source. This caps the process
//!    spawn rate under event storms (a save and a focus change firing within
//!    the same user action).
//! 2. Stale-focus suppression: switching focus back to a file with no edits
//!    recorded since its last run does not re-trigger analysis. Only focus
//!    changes are suppressible this way; an explicit save, open, or manual
//!    request is unconditional user intent to re-check.

use crate::event::{TriggerEvent, TriggerKind};
use crate::track::TrackingStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Minimum spacing between analysis runs of the same file (any trigger source)
pub const DEBOUNCE_WINDOW_MS: u64 = 3000;

/// Why a trigger was suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Same file was analyzed less than the debounce window ago
    Debounced,
    /// Focus returned to a file with no edits since its last run
    NotModified,
}

/// The globally last-analyzed file and time, shared across all files
#[derive(Debug, Default, Clone)]
struct SchedulerState {
    last_file: Option<PathBuf>,
    last_at: u64,
}

/// Decides whether a trigger runs analysis or is suppressed
///
/// One instance per session. Holds the global last-analyzed pair explicitly;
/// the per-file history lives in the [`TrackingStore`].
#[derive(Debug)]
pub struct SchedulingPolicy {
    state: SchedulerState,
    debounce_ms: u64,
}

impl SchedulingPolicy {
    /// Create a policy with the standard debounce window
    pub fn new() -> Self {
        Self::with_debounce(DEBOUNCE_WINDOW_MS)
    }

    /// Create a policy with an alternate debounce window (tests)
    pub fn with_debounce(debounce_ms: u64) -> Self {
        Self {
            state: SchedulerState::default(),
            debounce_ms,
        }
    }

    /// Evaluate the suppression rules for a trigger without updating state
    pub fn should_skip(&self, trigger: &TriggerEvent, store: &TrackingStore) -> Option<SkipReason> {
        if let Some(last_file) = &self.state.last_file {
            if last_file == &trigger.file
                && trigger.observed_at.saturating_sub(self.state.last_at) < self.debounce_ms
            {
                return Some(SkipReason::Debounced);
            }
        }

        if trigger.kind == TriggerKind::ActiveChanged {
            if let Some(entry) = store.get(&trigger.file) {
                if entry.last_modified_at <= entry.last_analyzed_at {
                    return Some(SkipReason::NotModified);
                }
            }
        }

        None
    }

    /// Decide on a trigger
    ///
    /// Returns the skip reason when suppressed. On run, stamps the global
    /// last-analyzed pair and the file's tracking entry before returning.
    pub fn decide(&mut self, trigger: &TriggerEvent, store: &mut TrackingStore) -> Option<SkipReason> {
        if let Some(reason) = self.should_skip(trigger, store) {
            return Some(reason);
        }

        self.state.last_file = Some(trigger.file.clone());
        self.state.last_at = trigger.observed_at;
        store.record_run_start(&trigger.file, trigger.observed_at, trigger.is_dirty);

        None
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self::new()
    }
}
