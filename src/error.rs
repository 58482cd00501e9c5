//! Error type shared by the scan pipeline, storage and the CLI.
//!
//! Structure extraction itself never produces an error; everything here
//! comes from I/O, persistence, configuration or argument parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by `code-monitor`.
#[derive(Debug, Error)]
pub enum Error {
    /// Direct I/O failure outside the filesystem port.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML config file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The HTML report template failed to parse or render.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// Command-line parsing failed, or help/version was requested.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// The folder to monitor does not exist.
    #[error("target folder does not exist: {}", path.display())]
    TargetMissing {
        /// The path that was given.
        path: PathBuf,
    },

    /// A port call failed.
    #[error("{message}")]
    Port {
        /// Operation context followed by the underlying error.
        message: String,
    },
}

impl Error {
    /// Wraps a port error with a description of the failed operation.
    #[must_use]
    pub fn port(context: impl std::fmt::Display, err: &PortError) -> Self {
        Self::Port { message: format!("{context}: {err}") }
    }

    /// Builds a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
