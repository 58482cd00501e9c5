//! Self-contained HTML report rendered from an embedded `tera` template.

use serde::Serialize;
use tera::{Context, Tera};

use super::format_size;
use crate::error::Result;
use crate::monitor::{ChangeReport, FileRecord, ScanSnapshot};
use crate::structure::{ChangeSet, ClassEntity, EntitySignature, FunctionEntity};

const TEMPLATE_NAME: &str = "report.html";
const TPL_REPORT: &str = include_str!("templates/report.html");

#[derive(Serialize)]
struct Card {
    value: usize,
    label: &'static str,
}

#[derive(Serialize)]
struct FileChanges<'a> {
    path: &'a str,
    line_diff: String,
    added: Vec<&'a str>,
    removed: Vec<&'a str>,
}

impl<'a> FileChanges<'a> {
    fn new(path: &'a str, line_diff: String, changes: &'a ChangeSet) -> Self {
        Self {
            path,
            line_diff,
            added: changes.added.iter().map(EntitySignature::as_str).collect(),
            removed: changes.removed.iter().map(EntitySignature::as_str).collect(),
        }
    }
}

#[derive(Serialize)]
struct FileRow<'a> {
    path: &'a str,
    size: String,
    lines: usize,
    functions: Vec<String>,
    classes: Vec<String>,
}

impl<'a> From<&'a FileRecord> for FileRow<'a> {
    fn from(file: &'a FileRecord) -> Self {
        Self {
            path: &file.file_path,
            size: format_size(file.file_size),
            lines: file.analysis.total_lines,
            functions: file.analysis.functions().map(describe_function).collect(),
            classes: file.analysis.classes().map(describe_class).collect(),
        }
    }
}

fn engine() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TPL_REPORT)?;
    Ok(tera)
}

fn context(snapshot: &ScanSnapshot, changes: &ChangeReport) -> Context {
    let s = &snapshot.summary;
    let cards = [
        Card { value: s.total_files, label: "files" },
        Card { value: s.total_folders, label: "folders" },
        Card { value: s.total_lines, label: "lines" },
        Card { value: s.brace_family_files, label: "JS/TS files" },
        Card { value: s.python_files, label: "Python files" },
        Card { value: s.other_files, label: "other files" },
    ];
    let modified: Vec<FileChanges<'_>> = changes
        .modified_files
        .iter()
        .map(|f| FileChanges::new(&f.file_path, format!("{:+}", f.line_diff), &f.function_changes))
        .collect();
    let function_changed: Vec<FileChanges<'_>> = changes
        .function_changed_files
        .iter()
        .map(|f| FileChanges::new(&f.file_path, String::new(), &f.function_changes))
        .collect();
    let files: Vec<FileRow<'_>> = snapshot.files.iter().map(FileRow::from).collect();

    let mut ctx = Context::new();
    ctx.insert("target", &snapshot.target_folder);
    ctx.insert("scan_id", &snapshot.scan_id);
    ctx.insert("timestamp", &snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    ctx.insert("cards", &cards);
    ctx.insert("has_changes", &changes.has_changes);
    ctx.insert("new_files", &changes.new_files);
    ctx.insert("deleted_files", &changes.deleted_files);
    ctx.insert("modified_files", &modified);
    ctx.insert("function_changed_files", &function_changed);
    ctx.insert("files", &files);
    ctx
}

/// Renders the full page. Every inserted value is HTML-escaped by the
/// template engine.
///
/// # Errors
///
/// Returns [`crate::Error::Template`] if the template fails to parse or render.
pub fn render(snapshot: &ScanSnapshot, changes: &ChangeReport) -> Result<String> {
    Ok(engine()?.render(TEMPLATE_NAME, &context(snapshot, changes))?)
}

fn describe_function(f: &FunctionEntity) -> String {
    format!("{}({}) {}-{}", f.name, f.args.join(", "), f.line_start, f.line_end)
}

fn describe_class(c: &ClassEntity) -> String {
    let mut text = format!("{} {} ({}-{})", c.kind, c.name, c.line_start, c.line_end);
    if !c.methods.is_empty() {
        let methods: Vec<String> = c.methods.iter().map(describe_function).collect();
        text.push_str(": ");
        text.push_str(&methods.join(", "));
    }
    text
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::monitor::{Language, ModifiedFile, ScanSummary};
    use crate::structure::{diff_extractions, extract_entities, extract_file};

    fn snapshot(files: Vec<FileRecord>) -> ScanSnapshot {
        ScanSnapshot {
            scan_id: "scan-1".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap(),
            target_folder: "proj<app>".into(),
            files,
            folders: vec![],
            summary: ScanSummary { total_files: 1, ..ScanSummary::default() },
        }
    }

    #[test]
    fn embedded_template_parses() {
        assert!(engine().is_ok());
    }

    #[test]
    fn page_is_escaped_and_lists_entities() {
        let source = "class Box {\n  open(lid) {\n  }\n}\nconst f = (a, b) => a;\n";
        let file = FileRecord {
            file_path: "box.js".into(),
            file_name: "box.js".into(),
            file_size: 2048,
            modified_time: None,
            file_hash: "h".into(),
            language: Language::BraceFamily,
            analysis: extract_file("box.js", source),
        };
        let page = render(&snapshot(vec![file]), &ChangeReport::default()).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("proj&lt;app&gt;"));
        assert!(!page.contains("<app>"));
        assert!(page.contains("at 2024-06-15 10:30:00 UTC"));
        assert!(page.contains("<h3>1</h3><p>files</p>"));
        assert!(page.contains("No changes since last scan."));
        assert!(page.contains("class Box (1-4): open(lid) 2-3"));
        assert!(page.contains("f(a, b) 5-5"));
        assert!(page.contains("2.0 KB"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn changes_are_listed_and_escaped() {
        let before = extract_entities("function a() {\n}\n");
        let after = extract_entities("function a() {\n}\nfunction b() {}\n");
        let changes = ChangeReport {
            has_changes: true,
            new_files: vec!["a<b>.js".into()],
            deleted_files: vec!["gone.js".into()],
            modified_files: vec![ModifiedFile {
                file_path: "app.js".into(),
                previous_lines: 2,
                current_lines: 3,
                line_diff: 1,
                function_changes: diff_extractions(&after, &before),
            }],
            ..ChangeReport::default()
        };
        let page = render(&snapshot(vec![]), &changes).unwrap();
        assert!(page.contains("<li class=\"added\">new: a&lt;b&gt;.js</li>"));
        assert!(page.contains("<li class=\"removed\">deleted: gone.js</li>"));
        assert!(page.contains("modified: app.js (+1 lines)"));
        assert!(page.contains("<li class=\"added\">+ function:b:1</li>"));
        assert!(!page.contains("No changes since last scan."));
    }
}
