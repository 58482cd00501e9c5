//! Human- and machine-readable scan reports.

pub mod html;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::monitor::{ChangeReport, ScanSnapshot};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain text summary.
    Text,
    /// `{ "snapshot": ..., "changes": ... }` as pretty JSON.
    Json,
    /// Self-contained HTML page.
    Html,
}

impl ReportFormat {
    /// File extension used for `latest_report.<ext>`.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    snapshot: &'a ScanSnapshot,
    changes: &'a ChangeReport,
}

/// Renders a report for one scan and its changes.
///
/// # Errors
///
/// Returns an error if JSON serialization or HTML template rendering fails.
pub fn render(
    format: ReportFormat,
    snapshot: &ScanSnapshot,
    changes: &ChangeReport,
) -> Result<String> {
    Ok(match format {
        ReportFormat::Text => text::render(snapshot, changes),
        ReportFormat::Json => serde_json::to_string_pretty(&JsonReport { snapshot, changes })?,
        ReportFormat::Html => html::render(snapshot, changes)?,
    })
}

/// Formats a byte count as `B`, `KB`, `MB` or `GB` with one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    match bytes {
        0..KB => format!("{bytes} B"),
        KB..MB => format!("{:.1} KB", bytes as f64 / KB as f64),
        MB..GB => format!("{:.1} MB", bytes as f64 / MB as f64),
        _ => format!("{:.1} GB", bytes as f64 / GB as f64),
    }
}
