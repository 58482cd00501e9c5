//! Scan history store.
//!
//! History lives in the output directory as one JSON array, oldest scan
//! first, and uses the `FileSystem` port for all I/O:
//!
//! ```text
//! <output_dir>/
//!   ├── history.json
//!   └── latest_report.<ext>
//! ```

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::monitor::ScanSnapshot;

/// File name of the history inside the output directory.
pub const HISTORY_FILE: &str = "history.json";

/// Number of scans kept when nothing else is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Persistence layer for past scans.
///
/// All I/O goes through `ctx.fs`; nothing is cached between calls.
pub struct HistoryStore<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
    limit: usize,
}

impl<'a> HistoryStore<'a> {
    /// Creates a store for `<output_dir>/history.json` keeping at most
    /// `limit` scans (at least one).
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, output_dir: &Path, limit: usize) -> Self {
        Self { ctx, path: output_dir.join(HISTORY_FILE), limit: limit.max(1) }
    }

    /// Path of the history file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all stored scans, oldest first.
    ///
    /// A missing file is an empty history. A file that does not parse is
    /// logged and also treated as empty, so the next append replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<ScanSnapshot>> {
        if !self.ctx.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&self.path)
            .map_err(|e| Error::port(format!("Failed to read {}", self.path.display()), &e))?;
        match serde_json::from_str(&contents) {
            Ok(history) => Ok(history),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "Ignoring corrupt history: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// The most recent stored scan, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be read.
    pub fn latest(&self) -> Result<Option<ScanSnapshot>> {
        Ok(self.load()?.pop())
    }

    /// Appends a scan and drops the oldest entries beyond the limit.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be read, serialized or written.
    pub fn append(&self, snapshot: ScanSnapshot) -> Result<()> {
        let mut history = self.load()?;
        history.push(snapshot);
        if history.len() > self.limit {
            let excess = history.len() - self.limit;
            history.drain(..excess);
        }
        self.save(&history)
    }

    fn save(&self, history: &[ScanSnapshot]) -> Result<()> {
        let json = serde_json::to_string_pretty(history)?;
        self.ctx
            .fs
            .write(&self.path, &json)
            .map_err(|e| Error::port(format!("Failed to write {}", self.path.display()), &e))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::monitor::ScanSummary;

    fn make_test_context(fs: MemoryFileSystem) -> ServiceContext {
        ServiceContext::in_memory(fs, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
    }

    fn sample_scan(id: &str) -> ScanSnapshot {
        ScanSnapshot {
            scan_id: id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            target_folder: "/proj".to_string(),
            files: vec![],
            folders: vec![],
            summary: ScanSummary::default(),
        }
    }

    #[test]
    fn missing_history_is_empty() {
        let ctx = make_test_context(MemoryFileSystem::new());
        let store = HistoryStore::new(&ctx, Path::new("/out"), 5);
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.latest().unwrap(), None);
    }

    #[test]
    fn append_and_load_round_trips() {
        let ctx = make_test_context(MemoryFileSystem::new());
        let store = HistoryStore::new(&ctx, Path::new("/out"), 5);

        store.append(sample_scan("one")).unwrap();
        store.append(sample_scan("two")).unwrap();

        let ids: Vec<_> = store.load().unwrap().into_iter().map(|s| s.scan_id).collect();
        assert_eq!(ids, vec!["one", "two"]);
        assert_eq!(store.latest().unwrap().map(|s| s.scan_id), Some("two".to_string()));
    }

    #[test]
    fn append_keeps_only_the_newest_entries() {
        let ctx = make_test_context(MemoryFileSystem::new());
        let store = HistoryStore::new(&ctx, Path::new("/out"), 3);

        for id in ["a", "b", "c", "d", "e"] {
            store.append(sample_scan(id)).unwrap();
        }

        let ids: Vec<_> = store.load().unwrap().into_iter().map(|s| s.scan_id).collect();
        assert_eq!(ids, vec!["c", "d", "e"]);
    }

    #[test]
    fn corrupt_history_is_treated_as_empty_and_replaced() {
        let fs = MemoryFileSystem::new().with_file("/out/history.json", "{not json");
        let ctx = make_test_context(fs);
        let store = HistoryStore::new(&ctx, Path::new("/out"), 3);

        assert!(store.load().unwrap().is_empty());
        store.append(sample_scan("fresh")).unwrap();

        let content = ctx.fs.read_to_string(store.path()).unwrap();
        assert!(content.contains("\"fresh\""));
    }

    #[test]
    fn unreadable_history_is_an_error() {
        let fs = MemoryFileSystem::new().with_unreadable_file("/out/history.json");
        let ctx = make_test_context(fs);
        let store = HistoryStore::new(&ctx, Path::new("/out"), 3);
        assert!(matches!(store.load(), Err(Error::Port { .. })));
    }
}
