//! Scan-to-scan change detection.
//!
//! Files are matched by relative path. The content hash decides first: a
//! differing hash makes the file modified, and only files with an identical
//! hash are checked for entity-level drift.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FileRecord, ScanSnapshot};
use crate::structure::{diff_extractions, ChangeSet};

/// A file whose content hash changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedFile {
    /// Path relative to the target folder.
    pub file_path: String,
    /// Line count in the previous scan.
    pub previous_lines: usize,
    /// Line count in the current scan.
    pub current_lines: usize,
    /// `current_lines - previous_lines`.
    pub line_diff: i64,
    /// Entities added and removed between the two versions.
    pub function_changes: ChangeSet,
}

/// A file with an unchanged hash but a different entity set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionChangedFile {
    /// Path relative to the target folder.
    pub file_path: String,
    /// The entity-level difference.
    pub function_changes: ChangeSet,
}

/// Differences between the current scan and the one before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    /// `true` when any file was added, deleted, modified or function-changed.
    pub has_changes: bool,
    /// Files not present in the previous scan.
    pub new_files: Vec<String>,
    /// Files no longer present.
    pub deleted_files: Vec<String>,
    /// Files whose content changed.
    pub modified_files: Vec<ModifiedFile>,
    /// Files with identical content but different entity signatures.
    pub function_changed_files: Vec<FunctionChangedFile>,
    /// Files with no change at all.
    pub unchanged_files: Vec<String>,
}

/// Compares `current` against `previous`. Without a previous scan every
/// file is new.
#[must_use]
pub fn detect_changes(current: &ScanSnapshot, previous: Option<&ScanSnapshot>) -> ChangeReport {
    let Some(previous) = previous else {
        return ChangeReport {
            has_changes: true,
            new_files: current.files.iter().map(|f| f.file_path.clone()).collect(),
            ..ChangeReport::default()
        };
    };

    let before: HashMap<&str, &FileRecord> =
        previous.files.iter().map(|f| (f.file_path.as_str(), f)).collect();
    let now: HashMap<&str, &FileRecord> =
        current.files.iter().map(|f| (f.file_path.as_str(), f)).collect();

    let mut report = ChangeReport::default();
    for file in &current.files {
        let Some(old) = before.get(file.file_path.as_str()) else {
            report.new_files.push(file.file_path.clone());
            continue;
        };

        let function_changes = diff_extractions(&file.analysis, &old.analysis);
        if file.file_hash != old.file_hash {
            let previous_lines = old.analysis.total_lines;
            let current_lines = file.analysis.total_lines;
            report.modified_files.push(ModifiedFile {
                file_path: file.file_path.clone(),
                previous_lines,
                current_lines,
                line_diff: line_diff(previous_lines, current_lines),
                function_changes,
            });
        } else if function_changes.has_structural_changes() {
            report
                .function_changed_files
                .push(FunctionChangedFile { file_path: file.file_path.clone(), function_changes });
        } else {
            report.unchanged_files.push(file.file_path.clone());
        }
    }

    report.deleted_files = previous
        .files
        .iter()
        .filter(|f| !now.contains_key(f.file_path.as_str()))
        .map(|f| f.file_path.clone())
        .collect();

    report.has_changes = !report.new_files.is_empty()
        || !report.deleted_files.is_empty()
        || !report.modified_files.is_empty()
        || !report.function_changed_files.is_empty();
    report
}

fn line_diff(previous: usize, current: usize) -> i64 {
    let signed = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
    signed(current) - signed(previous)
}
