//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::report::ReportFormat;

/// Top-level CLI parser for `code-monitor`.
#[derive(Debug, Parser)]
#[command(
    name = "code-monitor",
    version,
    about = "Watch a codebase and report file and function-level changes between scans"
)]
pub struct Cli {
    /// Log at debug level (`CODE_MONITOR_LOG` takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a folder once, compare with the previous scan and write reports.
    Scan {
        /// Folder to scan.
        target: PathBuf,
        /// Directory for history and reports.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report format to write; repeat for several.
        #[arg(long = "format", value_enum)]
        formats: Vec<ReportFormat>,
    },
    /// Scan a folder now and then periodically until interrupted.
    Watch {
        /// Folder to scan.
        target: PathBuf,
        /// Directory for history and reports.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Minutes between scans.
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Print the functions and classes found in one file.
    Extract {
        /// Source file to analyze.
        file: PathBuf,
        /// Print JSON instead of an outline.
        #[arg(long)]
        json: bool,
    },
    /// List the scans stored in an output directory.
    History {
        /// Monitored folder whose `.code-monitor.yaml` picks the output directory.
        target: Option<PathBuf>,
        /// Directory holding `history.json`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
