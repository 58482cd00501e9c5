//! Heuristic structure extraction for C-family source text (JavaScript,
//! TypeScript and relatives).
//!
//! No grammar is involved: declarations are recognized by an ordered table of
//! line patterns, bodies are delimited by brace matching that skips strings
//! and comments, and every search that could run long is bounded by a fixed
//! lookahead window. Extraction is total and pure; it never performs I/O and
//! never fails.

pub mod braces;
pub mod extractor;
pub mod lexer;
pub mod model;
pub mod patterns;
pub mod signature;
pub mod span;

pub use extractor::{extract_entities, extract_file};
pub use model::{ClassEntity, ClassKind, CodeEntity, FileExtraction, FunctionEntity, FunctionKind};
pub use signature::{diff_extractions, signatures, ChangeSet, EntitySignature};
