//! Directory walk and per-file analysis.

use rayon::prelude::*;

use super::hash::content_hash;
use super::{FileRecord, FolderRecord, Language, ScanSnapshot, ScanSummary};
use crate::config::MonitorConfig;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::WalkEntry;
use crate::structure::{extract_file, FileExtraction};

/// Scans `config.target` and analyzes every file not excluded by
/// `config.ignore`.
///
/// Files that cannot be read are logged and recorded with an empty
/// analysis and hash; they never abort the scan.
///
/// # Errors
///
/// Returns [`Error::TargetMissing`] if the target does not exist, or a port
/// error if it cannot be walked.
pub fn scan_folder(ctx: &ServiceContext, config: &MonitorConfig) -> Result<ScanSnapshot> {
    let root = &config.target;
    if !ctx.fs.exists(root) {
        return Err(Error::TargetMissing { path: root.clone() });
    }

    let entries = ctx
        .fs
        .walk(root, &config.ignore)
        .map_err(|e| Error::port(format!("Failed to walk {}", root.display()), &e))?;

    let (dirs, files): (Vec<WalkEntry>, Vec<WalkEntry>) =
        entries.into_iter().partition(|entry| entry.is_dir);

    let folders: Vec<FolderRecord> = dirs
        .iter()
        .map(|dir| FolderRecord {
            folder_path: relative_string(dir),
            folder_name: file_name(dir),
        })
        .collect();

    let loaded: Vec<(WalkEntry, Option<Vec<u8>>)> = files
        .into_iter()
        .map(|entry| {
            let path = root.join(&entry.relative_path);
            match ctx.fs.read_bytes(&path) {
                Ok(bytes) => (entry, Some(bytes)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "Unreadable file: {err}");
                    (entry, None)
                }
            }
        })
        .collect();

    let records: Vec<FileRecord> =
        loaded.into_par_iter().map(|(entry, bytes)| analyze(&entry, bytes.as_deref())).collect();

    let summary = summarize(&records, folders.len());
    Ok(ScanSnapshot {
        scan_id: ctx.id_gen.generate_id(),
        timestamp: ctx.clock.now(),
        target_folder: root.display().to_string(),
        files: records,
        folders,
        summary,
    })
}

fn analyze(entry: &WalkEntry, bytes: Option<&[u8]>) -> FileRecord {
    let file_path = relative_string(entry);
    let language = Language::from_path(&entry.relative_path);

    let (file_hash, analysis) = match bytes {
        Some(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            let analysis = match language {
                Language::BraceFamily => extract_file(&file_path, &text),
                Language::Python | Language::Other => {
                    FileExtraction::lines_only(file_path.as_str(), text.lines().count())
                }
            };
            (content_hash(bytes), analysis)
        }
        None => (String::new(), FileExtraction::lines_only(file_path.as_str(), 0)),
    };

    tracing::debug!(
        file = %file_path,
        entities = analysis.entities.len(),
        lines = analysis.total_lines,
        "Analyzed file"
    );

    FileRecord {
        file_name: file_name(entry),
        file_path,
        file_size: entry.size,
        modified_time: entry.modified,
        file_hash,
        language,
        analysis,
    }
}

fn summarize(files: &[FileRecord], total_folders: usize) -> ScanSummary {
    let mut summary =
        ScanSummary { total_files: files.len(), total_folders, ..ScanSummary::default() };
    for file in files {
        summary.total_lines += file.analysis.total_lines;
        match file.language {
            Language::BraceFamily => summary.brace_family_files += 1,
            Language::Python => summary.python_files += 1,
            Language::Other => summary.other_files += 1,
        }
    }
    summary
}

fn relative_string(entry: &WalkEntry) -> String {
    entry
        .relative_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_name(entry: &WalkEntry) -> String {
    entry
        .relative_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
