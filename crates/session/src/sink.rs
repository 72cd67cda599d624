//! Per-file diagnostic sets with last-writer ordering

use dashmap::DashMap;
use relint_core::Diagnostic;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Applied state for one file, keyed by the run that produced it
#[derive(Debug)]
struct SinkEntry {
    /// `started_at` of the run whose result is currently applied
    applied_run: u64,
    diagnostics: Vec<Diagnostic>,
}

/// The per-file collection of currently valid diagnostics
///
/// Sets are strictly partitioned by file and replaced wholesale per run,
/// never merged across runs. Completions apply in run-start order: a run
/// that finishes after a newer run's result has already been applied is
/// discarded instead of overwriting fresher diagnostics. A cleared file
/// keeps its watermark so late stale completions stay discarded too.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    files: DashMap<PathBuf, SinkEntry>,
}

impl DiagnosticSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the file's diagnostic set with a run's result
    ///
    /// Returns false when the write lost to a newer applied run and was
    /// discarded.
    pub fn replace(&self, file: &Path, started_at: u64, diagnostics: Vec<Diagnostic>) -> bool {
        self.apply(file, started_at, diagnostics)
    }

    /// Clear the file's diagnostic set (clean run)
    ///
    /// Same ordering guard as [`replace`](Self::replace).
    pub fn clear(&self, file: &Path, started_at: u64) -> bool {
        self.apply(file, started_at, Vec::new())
    }

    fn apply(&self, file: &Path, started_at: u64, diagnostics: Vec<Diagnostic>) -> bool {
        let mut entry = self.files.entry(file.to_path_buf()).or_insert(SinkEntry {
            applied_run: 0,
            diagnostics: Vec::new(),
        });

        if started_at < entry.applied_run {
            debug!(
                file = %file.display(),
                run = started_at,
                applied = entry.applied_run,
                "discarding stale completion"
            );
            return false;
        }

        entry.applied_run = started_at;
        entry.diagnostics = diagnostics;
        true
    }

    /// Current diagnostics for a file; `None` when clear
    pub fn get(&self, file: &Path) -> Option<Vec<Diagnostic>> {
        self.files
            .get(file)
            .filter(|entry| !entry.diagnostics.is_empty())
            .map(|entry| entry.diagnostics.clone())
    }

    /// Number of files currently holding diagnostics
    pub fn files_with_diagnostics(&self) -> usize {
        self.files.iter().filter(|entry| !entry.diagnostics.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relint_core::Severity;

    fn diag(line: u32, message: &str) -> Diagnostic {
        Diagnostic::from_reported(line, message, Severity::Error, None)
    }

    #[test]
    fn test_replace_then_get() {
        let sink = DiagnosticSink::new();
        assert!(sink.replace(Path::new("/a.php"), 1, vec![diag(5, "x")]));

        let diagnostics = sink.get(Path::new("/a.php")).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "x");
    }

    #[test]
    fn test_replace_is_wholesale_not_merged() {
        let sink = DiagnosticSink::new();
        sink.replace(Path::new("/a.php"), 1, vec![diag(1, "old"), diag(2, "old2")]);
        sink.replace(Path::new("/a.php"), 2, vec![diag(3, "new")]);

        let diagnostics = sink.get(Path::new("/a.php")).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "new");
    }

    #[test]
    fn test_clear_removes_diagnostics() {
        let sink = DiagnosticSink::new();
        sink.replace(Path::new("/a.php"), 1, vec![diag(1, "x")]);
        assert!(sink.clear(Path::new("/a.php"), 2));
        assert!(sink.get(Path::new("/a.php")).is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let sink = DiagnosticSink::new();
        // Run started at t=5 applied first (completion order != start order)
        assert!(sink.replace(Path::new("/a.php"), 5, vec![diag(1, "fresh")]));
        // Run started at t=3 finishes late and must not overwrite
        assert!(!sink.replace(Path::new("/a.php"), 3, vec![diag(9, "stale")]));

        let diagnostics = sink.get(Path::new("/a.php")).unwrap();
        assert_eq!(diagnostics[0].message, "fresh");
    }

    #[test]
    fn test_stale_clear_is_discarded() {
        let sink = DiagnosticSink::new();
        sink.replace(Path::new("/a.php"), 5, vec![diag(1, "fresh")]);
        assert!(!sink.clear(Path::new("/a.php"), 3));
        assert!(sink.get(Path::new("/a.php")).is_some());
    }

    #[test]
    fn test_stale_write_after_clear_is_discarded() {
        let sink = DiagnosticSink::new();
        sink.clear(Path::new("/a.php"), 5);
        // The cleared file keeps its watermark
        assert!(!sink.replace(Path::new("/a.php"), 3, vec![diag(1, "stale")]));
        assert!(sink.get(Path::new("/a.php")).is_none());
    }

    #[test]
    fn test_files_are_strictly_partitioned() {
        let sink = DiagnosticSink::new();
        sink.replace(Path::new("/a.php"), 1, vec![diag(1, "a")]);
        sink.replace(Path::new("/b.php"), 1, vec![diag(2, "b")]);

        sink.clear(Path::new("/a.php"), 2);

        assert!(sink.get(Path::new("/a.php")).is_none());
        assert_eq!(sink.get(Path::new("/b.php")).unwrap()[0].message, "b");
        assert_eq!(sink.files_with_diagnostics(), 1);
    }
}
