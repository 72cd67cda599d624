//! Serve an editor session over stdin/stdout

use crate::protocol::HostEvent;
use crate::settings;
use anyhow::{Context, Result};
use relint_core::now_ms;
use relint_session::{AnalysisSession, SessionEvent, SessionMessage};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(config_path: Option<PathBuf>, root: Option<PathBuf>) -> Result<()> {
    let root = match root {
        Some(root) => Some(root),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            settings::find_project_root(&cwd)
        }
    };
    let config = settings::load(config_path.as_deref(), root.as_deref())?;

    match &root {
        Some(root) => info!(root = %root.display(), "serving editor session"),
        None => info!("serving editor session (no project root)"),
    }

    let (event_tx, mut event_rx) = mpsc::channel::<SessionEvent>(64);
    let (inbox_tx, inbox_rx) = mpsc::channel::<SessionMessage>(64);

    let session = AnalysisSession::new(config, root, event_tx);
    let session_task = tokio::spawn(session.run(inbox_rx));

    // Session events stream to stdout, one JSON object per line
    let writer_task = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(event) = event_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => {
                    if stdout.write_all(line.as_bytes()).await.is_err()
                        || stdout.write_all(b"\n").await.is_err()
                        || stdout.flush().await.is_err()
                    {
                        // Host hung up; stop writing but let the session drain
                        break;
                    }
                }
                Err(err) => warn!(%err, "failed to serialize session event"),
            }
        }
    });

    // Host events arrive on stdin; a malformed line is skipped, EOF shuts
    // the session down
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => {
                if inbox_tx.send(event.into_message(now_ms())).await.is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, line, "ignoring malformed event line"),
        }
    }

    drop(inbox_tx);
    session_task.await.context("Session task panicked")?;
    writer_task.await.context("Writer task panicked")?;

    info!("session closed");
    Ok(())
}
