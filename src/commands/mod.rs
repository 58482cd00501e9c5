//! Command dispatch and handlers.

pub mod extract;
pub mod history;
pub mod scan;
pub mod watch;

use std::io::Write;

use crate::cli::Command;
use crate::config::Overrides;
use crate::context::ServiceContext;
use crate::error::Result;

/// Dispatch a parsed command to its handler using live adapters, printing
/// to stdout.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<()> {
    let ctx = ServiceContext::live();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch_with_context(command, &ctx, &mut out)
}

/// Dispatch a command with the given service context and output sink.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Scan { target, output, formats } => {
            let overrides = Overrides {
                target: target.clone(),
                output_dir: output.clone(),
                interval_minutes: None,
                formats: formats.clone(),
            };
            scan::run(ctx, &overrides, out)
        }
        Command::Watch { target, output, interval } => {
            let overrides = Overrides {
                target: target.clone(),
                output_dir: output.clone(),
                interval_minutes: *interval,
                formats: Vec::new(),
            };
            watch::run(ctx, &overrides)
        }
        Command::Extract { file, json } => extract::run(ctx, file, *json, out),
        Command::History { target, output } => {
            history::run(ctx, target.as_deref(), output.as_deref(), out)
        }
    }
}
