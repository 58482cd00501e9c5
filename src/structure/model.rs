//! Entity types produced by structural extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a function-like declaration was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// `function name(args)`
    Function,
    /// `const name = function(args)`
    FunctionExpression,
    /// `const name = (args) =>` and the bare single-parameter form.
    ArrowFunction,
    /// Object-literal or class method.
    Method,
    /// `async function name(args)`
    AsyncFunction,
    /// `const name = async (args) =>`
    AsyncArrow,
    /// `export function name(args)`
    ExportFunction,
    /// `export const name = (args) =>`
    ExportArrow,
}

impl FunctionKind {
    /// Stable tag used in signatures and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::FunctionExpression => "function_expression",
            Self::ArrowFunction => "arrow_function",
            Self::Method => "method",
            Self::AsyncFunction => "async_function",
            Self::AsyncArrow => "async_arrow",
            Self::ExportFunction => "export_function",
            Self::ExportArrow => "export_arrow",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class-family declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// `class Name {`
    Class,
    /// `export class Name {`
    ExportClass,
    /// `interface Name`
    Interface,
    /// `export interface Name`
    ExportInterface,
    /// `type Name`
    Type,
    /// `export type Name`
    ExportType,
}

impl ClassKind {
    /// Stable tag used in signatures and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::ExportClass => "export_class",
            Self::Interface => "interface",
            Self::ExportInterface => "export_interface",
            Self::Type => "type",
            Self::ExportType => "export_type",
        }
    }

    /// Returns `true` for real classes, whose bodies are brace-matched and
    /// searched for methods. Interfaces and type aliases are not.
    #[must_use]
    pub fn has_members(self) -> bool {
        matches!(self, Self::Class | Self::ExportClass)
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function, arrow binding or method with its inclusive 1-indexed span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntity {
    /// Declared name. Not unique within a file.
    pub name: String,
    /// Declaration form.
    pub kind: FunctionKind,
    /// First line of the declaration.
    pub line_start: usize,
    /// Last line of the body; equal to `line_start` when unresolved.
    pub line_end: usize,
    /// Parameter names with type annotations stripped.
    pub args: Vec<String>,
}

impl FunctionEntity {
    /// Number of lines covered by the span.
    #[must_use]
    pub fn span_len(&self) -> usize {
        span_len(self.line_start, self.line_end)
    }
}

/// A class, interface or type alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntity {
    /// Declared name.
    pub name: String,
    /// Declaration form.
    pub kind: ClassKind,
    /// First line of the declaration.
    pub line_start: usize,
    /// Last line of the declaration.
    pub line_end: usize,
    /// Methods found inside the class body. Always empty for interfaces and types.
    pub methods: Vec<FunctionEntity>,
}

impl ClassEntity {
    /// Number of lines covered by the span.
    #[must_use]
    pub fn span_len(&self) -> usize {
        span_len(self.line_start, self.line_end)
    }
}

fn span_len(start: usize, end: usize) -> usize {
    end.saturating_sub(start) + 1
}

/// Any extracted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum CodeEntity {
    /// Function-family declaration.
    Function(FunctionEntity),
    /// Class-family declaration.
    Class(ClassEntity),
}

impl CodeEntity {
    /// Declared name of the entity.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Class(c) => &c.name,
        }
    }

    /// First line of the entity.
    #[must_use]
    pub fn line_start(&self) -> usize {
        match self {
            Self::Function(f) => f.line_start,
            Self::Class(c) => c.line_start,
        }
    }

    /// Last line of the entity.
    #[must_use]
    pub fn line_end(&self) -> usize {
        match self {
            Self::Function(f) => f.line_end,
            Self::Class(c) => c.line_end,
        }
    }
}

/// Result of scanning one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExtraction {
    /// Path of the scanned file, relative to the monitored root. Empty when
    /// the text did not come from a file.
    #[serde(default)]
    pub file_path: String,
    /// Entities in the order their declaration lines were found.
    pub entities: Vec<CodeEntity>,
    /// Number of lines in the file.
    pub total_lines: usize,
}

impl FileExtraction {
    /// An extraction with no entities, used for files that are only counted.
    #[must_use]
    pub fn lines_only(file_path: impl Into<String>, total_lines: usize) -> Self {
        Self { file_path: file_path.into(), entities: Vec::new(), total_lines }
    }

    /// Attaches a file path to the extraction.
    #[must_use]
    pub fn with_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    /// Iterates over the top-level function entities.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionEntity> {
        self.entities.iter().filter_map(|e| match e {
            CodeEntity::Function(f) => Some(f),
            CodeEntity::Class(_) => None,
        })
    }

    /// Iterates over the class-family entities.
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.entities.iter().filter_map(|e| match e {
            CodeEntity::Class(c) => Some(c),
            CodeEntity::Function(_) => None,
        })
    }
}
