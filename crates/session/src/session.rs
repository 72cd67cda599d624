//! The session actor
//!
//! All scheduling decisions and tracking mutations happen on one actor task.
//! Process execution is the only suspending operation: runs are spawned, and
//! their outcomes come back as discrete completion messages on the actor
//! queue rather than nested callbacks. Multiple files may have runs in
//! flight concurrently; the debounce rule bounds the spawn rate, not the
//! in-flight count.

use crate::sink::DiagnosticSink;
use relint_core::{AnalyzerConfig, Diagnostic, SchedulingPolicy, SkipReason, TrackingStore, TriggerEvent};
use relint_runner::AnalysisOutcome;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Outbound effects for the host to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Busy indicator toggle for a file's in-flight run
    Busy { file: PathBuf, busy: bool },
    /// A run produced findings; the host replaces the file's diagnostics
    Published { file: PathBuf, diagnostics: Vec<Diagnostic> },
    /// A clean run; the host clears the file's diagnostics
    Cleared { file: PathBuf },
    /// A trigger was suppressed
    Skipped { file: PathBuf, reason: SkipReason },
    /// A run failed; prior diagnostics remain valid
    RunFailed { file: PathBuf, summary: String },
}

/// Inbound messages the session consumes
#[derive(Debug, Clone)]
pub enum SessionMessage {
    /// A trigger observed by the host
    Trigger(TriggerEvent),
    /// An edit observed by the host; marks the file modified
    Edit { file: PathBuf, at: u64 },
}

/// Completion of a spawned analyzer run
#[derive(Debug)]
struct Completion {
    file: PathBuf,
    started_at: u64,
    outcome: AnalysisOutcome,
}

/// Analysis session: scheduling state, in-flight runs, diagnostic sink
pub struct AnalysisSession {
    config: AnalyzerConfig,
    workdir: Option<PathBuf>,
    store: TrackingStore,
    policy: SchedulingPolicy,
    sink: Arc<DiagnosticSink>,
    events: mpsc::Sender<SessionEvent>,
}

impl AnalysisSession {
    /// Create a session emitting its effects on `events`
    pub fn new(config: AnalyzerConfig, workdir: Option<PathBuf>, events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            config,
            workdir,
            store: TrackingStore::new(),
            policy: SchedulingPolicy::new(),
            sink: Arc::new(DiagnosticSink::new()),
            events,
        }
    }

    /// Session with an alternate debounce window (tests)
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shared handle to the diagnostic sink
    pub fn sink(&self) -> Arc<DiagnosticSink> {
        Arc::clone(&self.sink)
    }

    /// Drive the session until the inbox closes, then drain in-flight runs
    pub async fn run(mut self, mut inbox: mpsc::Receiver<SessionMessage>) {
        let (completions_tx, mut completions_rx) = mpsc::channel::<Completion>(32);
        let mut in_flight = 0usize;

        loop {
            tokio::select! {
                message = inbox.recv() => match message {
                    Some(SessionMessage::Trigger(trigger)) => {
                        if self.handle(trigger, &completions_tx).await {
                            in_flight += 1;
                        }
                    }
                    Some(SessionMessage::Edit { file, at }) => self.record_edit(&file, at),
                    None => break,
                },
                Some(completion) = completions_rx.recv(), if in_flight > 0 => {
                    self.apply(completion).await;
                    in_flight -= 1;
                }
            }
        }

        // Inbox closed: outstanding runs still complete and apply
        while in_flight > 0 {
            match completions_rx.recv().await {
                Some(completion) => {
                    self.apply(completion).await;
                    in_flight -= 1;
                }
                None => break,
            }
        }
    }

    /// Decide on a trigger; spawn a run unless suppressed
    ///
    /// Returns true when a run was spawned.
    async fn handle(&mut self, trigger: TriggerEvent, completions: &mpsc::Sender<Completion>) -> bool {
        if let Some(reason) = self.policy.decide(&trigger, &mut self.store) {
            debug!(
                file = %trigger.file.display(),
                trigger = trigger.kind.label(),
                ?reason,
                "skipping analysis"
            );
            self.emit(SessionEvent::Skipped { file: trigger.file, reason }).await;
            return false;
        }

        info!(file = %trigger.file.display(), trigger = trigger.kind.label(), "analyzing");
        self.emit(SessionEvent::Busy {
            file: trigger.file.clone(),
            busy: true,
        })
        .await;

        let file = trigger.file;
        let started_at = trigger.observed_at;
        let config = self.config.clone();
        let workdir = self.workdir.clone();
        let completions = completions.clone();

        tokio::spawn(async move {
            let outcome = relint_runner::execute(&file, &config, workdir.as_deref()).await;
            // Session shutdown closes the receiver; nothing left to apply to
            let _ = completions
                .send(Completion {
                    file,
                    started_at,
                    outcome,
                })
                .await;
        });

        true
    }

    /// Record an observed edit
    fn record_edit(&mut self, file: &Path, at: u64) {
        debug!(file = %file.display(), "edit observed");
        self.store.record_modification(file, at);
    }

    /// Apply a completed run's outcome to the sink and notify the host
    async fn apply(&mut self, completion: Completion) {
        let Completion { file, started_at, outcome } = completion;

        match outcome {
            AnalysisOutcome::Clean => {
                if self.sink.clear(&file, started_at) {
                    info!(file = %file.display(), "no errors found");
                    self.emit(SessionEvent::Cleared { file: file.clone() }).await;
                }
            }
            AnalysisOutcome::Findings(diagnostics) => {
                if self.sink.replace(&file, started_at, diagnostics.clone()) {
                    info!(file = %file.display(), count = diagnostics.len(), "findings reported");
                    self.emit(SessionEvent::Published {
                        file: file.clone(),
                        diagnostics,
                    })
                    .await;
                }
            }
            AnalysisOutcome::ParseFailure { stdout, stderr, error } => {
                warn!(file = %file.display(), %error, "failed to parse analyzer output");
                debug!(%stdout, %stderr, "raw analyzer output");
                self.emit(SessionEvent::RunFailed {
                    file: file.clone(),
                    summary: format!("failed to parse analyzer output: {}", error),
                })
                .await;
            }
            AnalysisOutcome::ProcessFailure { stderr, error } => {
                warn!(file = %file.display(), %error, %stderr, "analyzer process failed");
                self.emit(SessionEvent::RunFailed {
                    file: file.clone(),
                    summary: format!("analyzer process failed: {}", error),
                })
                .await;
            }
        }

        self.emit(SessionEvent::Busy { file, busy: false }).await;
    }

    async fn emit(&self, event: SessionEvent) {
        // The host hanging up is not fatal to the session loop
        let _ = self.events.send(event).await;
    }
}
