//! Line-level declaration detection.
//!
//! Each family is an ordered table of `(pattern, kind)` pairs. Patterns are
//! tried top to bottom and the first hit wins, so the order of the tables is
//! part of the behavior: the generic `name = <expr> =>` arrow form sits ahead
//! of the `async` arrow form and therefore claims `const f = async (x) =>`.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{ClassKind, FunctionKind};

/// A function-family declaration found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMatch {
    /// Declaration form.
    pub kind: FunctionKind,
    /// Declared name.
    pub name: String,
    /// Parameter names after cleanup.
    pub args: Vec<String>,
}

/// A class-family declaration found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMatch {
    /// Declaration form.
    pub kind: ClassKind,
    /// Declared name.
    pub name: String,
}

type Table<K> = Vec<(Regex, K)>;

fn compile<K: Copy>(rows: &[(&str, K)]) -> Table<K> {
    rows.iter()
        .map(|&(pattern, kind)| {
            (Regex::new(pattern).expect("declaration pattern is a valid regex"), kind)
        })
        .collect()
}

static FUNCTION_PATTERNS: LazyLock<Table<FunctionKind>> = LazyLock::new(|| {
    compile(&[
        (r"^\s*function\s+(\w+)\s*\(([^)]*)\)", FunctionKind::Function),
        (
            r"^\s*(?:const|let|var)\s+(\w+)\s*=\s*function\s*\(([^)]*)\)",
            FunctionKind::FunctionExpression,
        ),
        (r"^\s*(?:const|let|var)\s+(\w+)\s*=\s*\(([^)]*)\)\s*=>", FunctionKind::ArrowFunction),
        (r"^\s*(?:const|let|var)\s+(\w+)\s*=\s*([^=]*?)\s*=>", FunctionKind::ArrowFunction),
        (r"^\s*(\w+)\s*:\s*function\s*\(([^)]*)\)", FunctionKind::Method),
        (r"^\s*(\w+)\s*\(([^)]*)\)\s*\{", FunctionKind::Method),
        (r"^\s*async\s+function\s+(\w+)\s*\(([^)]*)\)", FunctionKind::AsyncFunction),
        (
            r"^\s*(?:const|let|var)\s+(\w+)\s*=\s*async\s*\(([^)]*)\)\s*=>",
            FunctionKind::AsyncArrow,
        ),
        (r"^\s*export\s+function\s+(\w+)\s*\(([^)]*)\)", FunctionKind::ExportFunction),
        (r"^\s*export\s+const\s+(\w+)\s*=\s*\(([^)]*)\)\s*=>", FunctionKind::ExportArrow),
    ])
});

static CLASS_PATTERNS: LazyLock<Table<ClassKind>> = LazyLock::new(|| {
    compile(&[
        (r"^\s*class\s+(\w+)(?:\s+extends\s+\w+)?\s*\{", ClassKind::Class),
        (r"^\s*export\s+class\s+(\w+)(?:\s+extends\s+\w+)?\s*\{", ClassKind::ExportClass),
        (r"^\s*interface\s+(\w+)", ClassKind::Interface),
        (r"^\s*export\s+interface\s+(\w+)", ClassKind::ExportInterface),
        (r"^\s*type\s+(\w+)", ClassKind::Type),
        (r"^\s*export\s+type\s+(\w+)", ClassKind::ExportType),
    ])
});

static METHOD_PATTERNS: LazyLock<Table<FunctionKind>> = LazyLock::new(|| {
    compile(&[
        (r"^\s*(\w+)\s*\(([^)]*)\)\s*\{", FunctionKind::Method),
        (r"^\s*async\s+(\w+)\s*\(([^)]*)\)\s*\{", FunctionKind::Method),
        (r"^\s*static\s+(\w+)\s*\(([^)]*)\)\s*\{", FunctionKind::Method),
        (r"^\s*private\s+(\w+)\s*\(([^)]*)\)\s*\{", FunctionKind::Method),
        (r"^\s*public\s+(\w+)\s*\(([^)]*)\)\s*\{", FunctionKind::Method),
        (r"^\s*protected\s+(\w+)\s*\(([^)]*)\)\s*\{", FunctionKind::Method),
    ])
});

fn first_function_match(table: &Table<FunctionKind>, line: &str) -> Option<FunctionMatch> {
    table.iter().find_map(|(regex, kind)| {
        let caps = regex.captures(line)?;
        let name = caps.get(1)?.as_str().to_string();
        let args = caps.get(2).map_or_else(Vec::new, |raw| parse_args(raw.as_str()));
        Some(FunctionMatch { kind: *kind, name, args })
    })
}

/// Classifies `line` against the function-family table.
#[must_use]
pub fn detect_function(line: &str) -> Option<FunctionMatch> {
    first_function_match(&FUNCTION_PATTERNS, line)
}

/// Classifies `line` against the class-family table.
#[must_use]
pub fn detect_class(line: &str) -> Option<ClassMatch> {
    CLASS_PATTERNS.iter().find_map(|(regex, kind)| {
        let name = regex.captures(line)?.get(1)?.as_str().to_string();
        Some(ClassMatch { kind: *kind, name })
    })
}

/// Classifies a line inside a class body against the method table.
#[must_use]
pub fn detect_method(line: &str) -> Option<FunctionMatch> {
    first_function_match(&METHOD_PATTERNS, line)
}

/// Splits a raw parameter list into names.
///
/// Type annotations (everything from the first `:`) are cut off and pieces
/// starting with `{` are dropped; destructuring patterns are not parsed.
#[must_use]
pub fn parse_args(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .filter_map(|piece| {
            let name = piece.trim().split(':').next().unwrap_or_default().trim();
            (!name.is_empty() && !name.starts_with('{')).then(|| name.to_string())
        })
        .collect()
}
