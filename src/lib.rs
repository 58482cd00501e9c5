//! Core library for the `code-monitor` CLI.
//!
//! [`structure`] holds the pure, total extraction of functions and classes
//! from C-family source text and the signature diff between two
//! extractions. [`monitor`] wraps it with directory scanning, history and
//! reports; all I/O goes through the [`ports`] bundled in a
//! [`context::ServiceContext`].

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod ports;
pub mod report;
pub mod store;
pub mod structure;

use clap::Parser;

pub use error::{Error, Result};

/// Parses command-line arguments.
///
/// Returns `Ok(None)` after printing help or version text.
///
/// # Errors
///
/// Returns [`Error::Cli`] for invalid arguments.
pub fn parse<I, T>(args: I) -> Result<Option<cli::Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match cli::Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if !err.use_stderr() => {
            err.print()?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match parse(args)? {
        Some(cli) => commands::dispatch(&cli.command),
        None => Ok(()),
    }
}
