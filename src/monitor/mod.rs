//! Folder monitoring: scanning, change detection and the scan cycle that
//! ties them to history and reports.

pub mod changes;
pub mod hash;
pub mod scanner;
pub mod schedule;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::report;
use crate::store::HistoryStore;
use crate::structure::FileExtraction;

pub use changes::{detect_changes, ChangeReport, FunctionChangedFile, ModifiedFile};
pub use scanner::scan_folder;

/// How a file's contents are analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// JavaScript, TypeScript and their module variants; structure is extracted.
    BraceFamily,
    /// Python; only lines are counted.
    Python,
    /// Anything else; only lines are counted.
    Other,
}

impl Language {
    /// Classifies a path by its extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &std::path::Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs" => Self::BraceFamily,
            "py" => Self::Python,
            _ => Self::Other,
        }
    }
}

/// A folder seen during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    /// Path relative to the target folder.
    pub folder_path: String,
    /// Last path component.
    pub folder_name: String,
}

/// A file seen during a scan, with its analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the target folder, `/`-separated.
    pub file_path: String,
    /// Last path component.
    pub file_name: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Last modification time, when known.
    pub modified_time: Option<DateTime<Utc>>,
    /// SHA-256 of the contents; empty when the file could not be read.
    pub file_hash: String,
    /// Analysis route taken for the file.
    pub language: Language,
    /// Extracted structure and line count.
    pub analysis: FileExtraction,
}

/// Totals over one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Number of files.
    pub total_files: usize,
    /// Number of folders.
    pub total_folders: usize,
    /// Sum of line counts over all files.
    pub total_lines: usize,
    /// Files analyzed structurally.
    pub brace_family_files: usize,
    /// Python files.
    pub python_files: usize,
    /// Everything else.
    pub other_files: usize,
}

/// Everything recorded by one scan of the target folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    /// Unique id of the scan.
    pub scan_id: String,
    /// When the scan ran.
    pub timestamp: DateTime<Utc>,
    /// The folder that was scanned, as given.
    pub target_folder: String,
    /// Files in walk order.
    pub files: Vec<FileRecord>,
    /// Folders in walk order.
    pub folders: Vec<FolderRecord>,
    /// Totals.
    pub summary: ScanSummary,
}

/// Result of one full scan cycle.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The new snapshot, already stored in history.
    pub snapshot: ScanSnapshot,
    /// Changes relative to the previous snapshot.
    pub changes: ChangeReport,
    /// Report files written, one per configured format.
    pub report_paths: Vec<PathBuf>,
}

/// Runs one scan cycle: scan, compare with the last stored scan, store the
/// new one and write the configured reports.
///
/// # Errors
///
/// Returns an error if the target folder is missing, history cannot be
/// read or written, or a report cannot be written.
pub fn run_scan(ctx: &ServiceContext, config: &MonitorConfig) -> Result<ScanOutcome> {
    tracing::info!(target_folder = %config.target.display(), "Starting scan");

    let snapshot = scan_folder(ctx, config)?;
    let history = HistoryStore::new(ctx, &config.output_dir, config.history_limit);
    let previous = history.latest()?;
    let changes = detect_changes(&snapshot, previous.as_ref());
    history.append(snapshot.clone())?;

    let mut report_paths = Vec::with_capacity(config.formats.len());
    for format in &config.formats {
        let path = config.output_dir.join(format!("latest_report.{}", format.extension()));
        let body = report::render(*format, &snapshot, &changes)?;
        ctx.fs
            .write(&path, &body)
            .map_err(|e| Error::port(format!("Failed to write {}", path.display()), &e))?;
        report_paths.push(path);
    }

    tracing::info!(
        scan_id = %snapshot.scan_id,
        files = snapshot.summary.total_files,
        lines = snapshot.summary.total_lines,
        has_changes = changes.has_changes,
        "Scan complete"
    );
    Ok(ScanOutcome { snapshot, changes, report_paths })
}
