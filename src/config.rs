//! Layered monitor configuration.
//!
//! Later layers override earlier ones:
//!
//! 1. built-in defaults
//! 2. `<target>/.code-monitor.yaml`
//! 3. `CODE_MONITOR_*` environment variables
//! 4. command-line flags

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::report::ReportFormat;
use crate::store::DEFAULT_HISTORY_LIMIT;

/// Name of the optional config file inside the target folder.
pub const CONFIG_FILE: &str = ".code-monitor.yaml";
/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "monitoring_output";
/// Minutes between scans in watch mode.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 10;
/// Directory names never scanned.
pub const DEFAULT_IGNORE: [&str; 3] = [".git", "node_modules", "target"];

/// Environment variable overriding the output directory.
pub const ENV_OUTPUT: &str = "CODE_MONITOR_OUTPUT";
/// Environment variable overriding the watch interval in minutes.
pub const ENV_INTERVAL: &str = "CODE_MONITOR_INTERVAL";
/// Environment variable overriding the number of stored scans.
pub const ENV_HISTORY_LIMIT: &str = "CODE_MONITOR_HISTORY_LIMIT";

/// Fully resolved configuration for one monitored folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Folder to scan.
    pub target: PathBuf,
    /// Where history and reports are written.
    pub output_dir: PathBuf,
    /// Minutes between scans in watch mode.
    pub interval_minutes: u64,
    /// Number of scans kept in history.
    pub history_limit: usize,
    /// File and directory names skipped during the walk.
    pub ignore: Vec<String>,
    /// Report formats written after each scan.
    pub formats: Vec<ReportFormat>,
}

impl MonitorConfig {
    /// Defaults for `target`.
    #[must_use]
    pub fn new(target: impl Into<PathBuf>) -> Self {
        let mut config = Self {
            target: target.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            history_limit: DEFAULT_HISTORY_LIMIT,
            ignore: DEFAULT_IGNORE.iter().map(ToString::to_string).collect(),
            formats: vec![ReportFormat::Html],
        };
        config.ignore_output_dir();
        config
    }

    /// Resolves the configuration for `overrides.target` from all layers,
    /// reading environment variables through `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target does not exist, the config file cannot
    /// be read or parsed, or a value is out of range.
    pub fn load<F>(ctx: &ServiceContext, overrides: &Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !ctx.fs.exists(&overrides.target) {
            return Err(Error::TargetMissing { path: overrides.target.clone() });
        }

        let mut config = Self::new(&overrides.target);
        if let Some(file) = FileConfig::read(ctx, &overrides.target)? {
            config.apply_file(file);
        }
        config.apply_env(env)?;
        config.apply_overrides(overrides);
        config.ignore_output_dir();
        config.validate()?;
        Ok(config)
    }

    /// [`load`](Self::load) with the process environment.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_env(ctx: &ServiceContext, overrides: &Overrides) -> Result<Self> {
        Self::load(ctx, overrides, |key| std::env::var(key).ok())
    }

    /// Minutes between scans as a [`std::time::Duration`].
    #[must_use]
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(minutes) = file.interval_minutes {
            self.interval_minutes = minutes;
        }
        if let Some(limit) = file.history_limit {
            self.history_limit = limit;
        }
        for name in file.ignore {
            if !self.ignore.contains(&name) {
                self.ignore.push(name);
            }
        }
        if let Some(formats) = file.formats {
            self.formats = formats;
        }
    }

    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = env(ENV_OUTPUT).filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(raw) = env(ENV_INTERVAL) {
            self.interval_minutes = parse_number(ENV_INTERVAL, &raw)?;
        }
        if let Some(raw) = env(ENV_HISTORY_LIMIT) {
            self.history_limit = parse_number(ENV_HISTORY_LIMIT, &raw)?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.output_dir {
            self.output_dir.clone_from(dir);
        }
        if let Some(minutes) = overrides.interval_minutes {
            self.interval_minutes = minutes;
        }
        if !overrides.formats.is_empty() {
            self.formats.clone_from(&overrides.formats);
        }
    }

    fn ignore_output_dir(&mut self) {
        let Some(name) = self.output_dir.file_name().and_then(|n| n.to_str()) else { return };
        if !self.ignore.iter().any(|existing| existing == name) {
            self.ignore.push(name.to_string());
        }
    }

    fn validate(&self) -> Result<()> {
        if self.interval_minutes == 0 {
            return Err(Error::config("interval must be at least one minute"));
        }
        if self.history_limit == 0 {
            return Err(Error::config("history limit must be at least 1"));
        }
        if self.formats.is_empty() {
            return Err(Error::config("at least one report format is required"));
        }
        Ok(())
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Folder to scan.
    pub target: PathBuf,
    /// `-o/--output`.
    pub output_dir: Option<PathBuf>,
    /// `-i/--interval`.
    pub interval_minutes: Option<u64>,
    /// `--format`, repeatable; empty keeps the configured formats.
    pub formats: Vec<ReportFormat>,
}

/// Shape of `.code-monitor.yaml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    output_dir: Option<PathBuf>,
    interval_minutes: Option<u64>,
    history_limit: Option<usize>,
    ignore: Vec<String>,
    formats: Option<Vec<ReportFormat>>,
}

impl FileConfig {
    fn read(ctx: &ServiceContext, target: &Path) -> Result<Option<Self>> {
        let path = target.join(CONFIG_FILE);
        if !ctx.fs.exists(&path) {
            return Ok(None);
        }
        let contents = ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| Error::port(format!("Failed to read {}", path.display()), &e))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(Some(serde_yaml::from_str(&contents)?))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::config(format!("{key} must be a positive integer, got {raw:?}")))
}
