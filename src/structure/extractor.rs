//! Line-by-line entity extraction.

use super::model::{ClassEntity, CodeEntity, FileExtraction, FunctionEntity};
use super::patterns::{detect_class, detect_function, detect_method, FunctionMatch};
use super::span::{resolve_end, BodyShape};

/// Extracts every function and class-family declaration from `text`.
///
/// Never fails: text with no recognizable declarations yields an empty
/// entity list, and spans whose end cannot be found collapse to one line.
#[must_use]
pub fn extract_entities(text: &str) -> FileExtraction {
    let lines: Vec<&str> = text.lines().collect();
    let mut entities = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;

        if let Some(found) = detect_function(line) {
            entities.push(CodeEntity::Function(function_entity(&lines, line_no, found)));
        }

        if let Some(found) = detect_class(line) {
            let line_end = resolve_end(&lines, line_no, BodyShape::of_class(line, found.kind));
            let methods = if found.kind.has_members() {
                collect_methods(&lines, line_no, line_end)
            } else {
                Vec::new()
            };
            entities.push(CodeEntity::Class(ClassEntity {
                name: found.name,
                kind: found.kind,
                line_start: line_no,
                line_end,
                methods,
            }));
        }
    }

    FileExtraction { file_path: String::new(), entities, total_lines: lines.len() }
}

/// [`extract_entities`] with the file path attached.
#[must_use]
pub fn extract_file(file_path: &str, text: &str) -> FileExtraction {
    extract_entities(text).with_path(file_path)
}

fn function_entity(lines: &[&str], line_no: usize, found: FunctionMatch) -> FunctionEntity {
    let line_end = resolve_end(lines, line_no, BodyShape::of_function(lines[line_no - 1]));
    FunctionEntity {
        name: found.name,
        kind: found.kind,
        line_start: line_no,
        line_end,
        args: found.args,
    }
}

// Body lines after the class header, through the closing line.
fn collect_methods(lines: &[&str], class_start: usize, class_end: usize) -> Vec<FunctionEntity> {
    (class_start + 1..=class_end.min(lines.len()))
        .filter_map(|line_no| {
            detect_method(lines[line_no - 1]).map(|found| function_entity(lines, line_no, found))
        })
        .collect()
}
