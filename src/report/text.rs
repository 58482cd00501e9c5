//! Plain text report.

use crate::monitor::{ChangeReport, ScanSnapshot};
use crate::structure::ChangeSet;

/// Renders the summary block followed by the change list.
#[must_use]
pub fn render(snapshot: &ScanSnapshot, changes: &ChangeReport) -> String {
    let summary = &snapshot.summary;
    let mut lines = vec![
        format!("Scan {} of {}", snapshot.scan_id, snapshot.target_folder),
        format!("Time:    {}", snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
        format!(
            "Files:   {} ({} brace-family, {} python, {} other)",
            summary.total_files,
            summary.brace_family_files,
            summary.python_files,
            summary.other_files
        ),
        format!("Folders: {}", summary.total_folders),
        format!("Lines:   {}", summary.total_lines),
        String::new(),
    ];
    lines.push(format_changes(changes));
    lines.join("\n")
}

/// Formats a [`ChangeReport`] for human-readable display.
#[must_use]
pub fn format_changes(changes: &ChangeReport) -> String {
    if !changes.has_changes {
        return "No changes since last scan.".to_string();
    }

    let mut lines = Vec::new();

    if !changes.new_files.is_empty() {
        lines.push("New files:".to_string());
        for path in &changes.new_files {
            lines.push(format!("  + {path}"));
        }
    }
    if !changes.deleted_files.is_empty() {
        lines.push("Deleted files:".to_string());
        for path in &changes.deleted_files {
            lines.push(format!("  - {path}"));
        }
    }
    if !changes.modified_files.is_empty() {
        lines.push("Modified files:".to_string());
        for file in &changes.modified_files {
            lines.push(format!("  ~ {} ({:+} lines)", file.file_path, file.line_diff));
            push_entity_changes(&mut lines, &file.function_changes);
        }
    }
    if !changes.function_changed_files.is_empty() {
        lines.push("Function changes:".to_string());
        for file in &changes.function_changed_files {
            lines.push(format!("  * {}", file.file_path));
            push_entity_changes(&mut lines, &file.function_changes);
        }
    }

    lines.join("\n")
}

fn push_entity_changes(lines: &mut Vec<String>, changes: &ChangeSet) {
    for sig in &changes.added {
        lines.push(format!("      + {sig}"));
    }
    for sig in &changes.removed {
        lines.push(format!("      - {sig}"));
    }
}
