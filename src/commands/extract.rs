//! `code-monitor extract` command.

use std::io::Write;
use std::path::Path;

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::structure::{extract_file, CodeEntity, FileExtraction, FunctionEntity};

/// Execute the `extract` command.
///
/// Prints an outline of the functions and classes in `file`, or the raw
/// extraction as JSON when `json` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the output cannot be
/// written.
pub fn run(ctx: &ServiceContext, file: &Path, json: bool, out: &mut impl Write) -> Result<()> {
    let bytes = ctx
        .fs
        .read_bytes(file)
        .map_err(|e| Error::port(format!("Failed to read {}", file.display()), &e))?;
    let extraction = extract_file(&file.display().to_string(), &String::from_utf8_lossy(&bytes));

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&extraction)?)?;
    } else {
        write_outline(&extraction, out)?;
    }
    Ok(())
}

fn write_outline(extraction: &FileExtraction, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{} ({} lines)", extraction.file_path, extraction.total_lines)?;
    if extraction.entities.is_empty() {
        writeln!(out, "  no functions or classes found")?;
    }
    for entity in &extraction.entities {
        match entity {
            CodeEntity::Function(f) => writeln!(out, "  {}", outline_function(f))?,
            CodeEntity::Class(c) => {
                writeln!(out, "  {} {} {}-{}", c.kind, c.name, c.line_start, c.line_end)?;
                for method in &c.methods {
                    writeln!(out, "    {}", outline_function(method))?;
                }
            }
        }
    }
    Ok(())
}

fn outline_function(f: &FunctionEntity) -> String {
    format!("{} {}({}) {}-{}", f.kind, f.name, f.args.join(", "), f.line_start, f.line_end)
}
