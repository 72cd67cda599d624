//! Wire protocol for `relint serve`
//!
//! Inbound: one JSON object per stdin line, mirroring the host editor's
//! native event subscriptions. Outbound: [`relint_session::SessionEvent`]
//! serialized one per stdout line.

use relint_core::{TriggerEvent, TriggerKind};
use relint_session::SessionMessage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An event as the host editor reports it
///
/// Timestamps are assigned on receipt, so hosts only ship the event kind,
/// the file, and the dirty flag where their event model carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Document opened
    Opened {
        file: PathBuf,
        #[serde(default)]
        dirty: bool,
    },
    /// Document saved
    Saved {
        file: PathBuf,
        #[serde(default)]
        dirty: bool,
    },
    /// Active editor switched to the document
    ActiveChanged {
        file: PathBuf,
        #[serde(default)]
        dirty: bool,
    },
    /// Document was already open when the session started
    InitialActive {
        file: PathBuf,
        #[serde(default)]
        dirty: bool,
    },
    /// Document text changed (an edit)
    Changed { file: PathBuf },
    /// Explicit re-check requested by the user
    Analyze {
        file: PathBuf,
        #[serde(default)]
        dirty: bool,
    },
}

impl HostEvent {
    /// Convert into a session message stamped with the receipt time
    pub fn into_message(self, at: u64) -> SessionMessage {
        let trigger = |kind, file, dirty| SessionMessage::Trigger(TriggerEvent::new(kind, file, dirty, at));

        match self {
            HostEvent::Opened { file, dirty } => trigger(TriggerKind::Opened, file, dirty),
            HostEvent::Saved { file, dirty } => trigger(TriggerKind::Saved, file, dirty),
            HostEvent::ActiveChanged { file, dirty } => trigger(TriggerKind::ActiveChanged, file, dirty),
            HostEvent::InitialActive { file, dirty } => trigger(TriggerKind::InitialActive, file, dirty),
            HostEvent::Analyze { file, dirty } => trigger(TriggerKind::ManuallyTriggered, file, dirty),
            HostEvent::Changed { file } => SessionMessage::Edit { file, at },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines_deserialize() {
        let event: HostEvent = serde_json::from_str(r#"{"type": "opened", "file": "/a.php"}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::Opened {
                file: "/a.php".into(),
                dirty: false
            }
        );

        let event: HostEvent =
            serde_json::from_str(r#"{"type": "saved", "file": "/a.php", "dirty": true}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::Saved {
                file: "/a.php".into(),
                dirty: true
            }
        );
    }

    #[test]
    fn test_change_event_becomes_edit_message() {
        let event: HostEvent = serde_json::from_str(r#"{"type": "changed", "file": "/a.php"}"#).unwrap();
        match event.into_message(42) {
            SessionMessage::Edit { file, at } => {
                assert_eq!(file, PathBuf::from("/a.php"));
                assert_eq!(at, 42);
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn test_trigger_events_carry_kind_and_receipt_time() {
        let event: HostEvent = serde_json::from_str(r#"{"type": "analyze", "file": "/a.php"}"#).unwrap();
        match event.into_message(7) {
            SessionMessage::Trigger(trigger) => {
                assert_eq!(trigger.kind, TriggerKind::ManuallyTriggered);
                assert_eq!(trigger.observed_at, 7);
                assert!(!trigger.is_dirty);
            }
            other => panic!("expected trigger, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        assert!(serde_json::from_str::<HostEvent>(r#"{"type": "resized", "file": "/a.php"}"#).is_err());
    }
}
