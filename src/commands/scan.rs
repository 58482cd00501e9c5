//! `code-monitor scan` command.

use std::io::Write;

use crate::config::{MonitorConfig, Overrides};
use crate::context::ServiceContext;
use crate::error::Result;
use crate::monitor::run_scan;
use crate::report::text;

/// Execute the `scan` command.
///
/// Runs one scan cycle and prints the text report followed by the paths of
/// the report files written.
///
/// # Errors
///
/// Returns an error if configuration fails to load or the scan fails.
pub fn run(ctx: &ServiceContext, overrides: &Overrides, out: &mut impl Write) -> Result<()> {
    let config = MonitorConfig::from_env(ctx, overrides)?;
    let outcome = run_scan(ctx, &config)?;

    writeln!(out, "{}", text::render(&outcome.snapshot, &outcome.changes))?;
    for path in &outcome.report_paths {
        writeln!(out, "Report written to {}", path.display())?;
    }
    Ok(())
}
