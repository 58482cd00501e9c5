//! `code-monitor history` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{MonitorConfig, Overrides, DEFAULT_OUTPUT_DIR, ENV_OUTPUT};
use crate::context::ServiceContext;
use crate::error::Result;
use crate::store::{HistoryStore, DEFAULT_HISTORY_LIMIT};

/// Output directory from the flag, then `CODE_MONITOR_OUTPUT`, then the
/// default.
#[must_use]
pub fn resolve_output_dir(flag: Option<&Path>, env: Option<String>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// Execute the `history` command.
///
/// Lists every stored scan, oldest first. With a `target` the output
/// directory is resolved through the full config layering, so a
/// `.code-monitor.yaml` in the target is honored the same way `scan` does.
///
/// # Errors
///
/// Returns an error if the target's configuration fails to load or the
/// history file exists but cannot be read.
pub fn run(
    ctx: &ServiceContext,
    target: Option<&Path>,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let (output_dir, limit) = match target {
        Some(target) => {
            let overrides = Overrides {
                target: target.to_path_buf(),
                output_dir: output.map(Path::to_path_buf),
                ..Overrides::default()
            };
            let config = MonitorConfig::from_env(ctx, &overrides)?;
            (config.output_dir, config.history_limit)
        }
        None => (resolve_output_dir(output, std::env::var(ENV_OUTPUT).ok()), DEFAULT_HISTORY_LIMIT),
    };
    let store = HistoryStore::new(ctx, &output_dir, limit);
    let history = store.load()?;

    if history.is_empty() {
        writeln!(out, "No scans recorded in {}.", output_dir.display())?;
        return Ok(());
    }

    writeln!(out, "{:<38} {:<20} {:>7} {:>9}", "SCAN ID", "TIMESTAMP (UTC)", "FILES", "LINES")?;
    for scan in &history {
        writeln!(
            out,
            "{:<38} {:<20} {:>7} {:>9}",
            scan.scan_id,
            scan.timestamp.format("%Y-%m-%d %H:%M:%S"),
            scan.summary.total_files,
            scan.summary.total_lines
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::config::MonitorConfig;
    use crate::monitor::run_scan;

    #[test]
    fn flag_beats_env_beats_default() {
        let env = Some("/env".to_string());
        assert_eq!(resolve_output_dir(Some(Path::new("/flag")), env.clone()), Path::new("/flag"));
        assert_eq!(resolve_output_dir(None, env), Path::new("/env"));
        assert_eq!(resolve_output_dir(None, None), Path::new(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn empty_history_says_so() {
        let ctx = ServiceContext::in_memory(MemoryFileSystem::new(), Utc::now());
        let mut out = Vec::new();
        run(&ctx, None, Some(Path::new("/out")), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No scans recorded in /out.\n");
    }

    #[test]
    fn lists_stored_scans() {
        let fs = MemoryFileSystem::new().with_file("/proj/a.js", "const a = 1;\nconst b = 2;\n");
        let ctx = ServiceContext::in_memory(fs, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
        let mut config = MonitorConfig::new("/proj");
        config.output_dir = PathBuf::from("/out");
        run_scan(&ctx, &config).unwrap();
        run_scan(&ctx, &config).unwrap();

        let mut out = Vec::new();
        run(&ctx, None, Some(Path::new("/out")), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = printed.lines().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("SCAN ID"));
        assert!(rows[1].starts_with("scan-1"));
        assert!(rows[2].contains("2024-05-06 07:08:09"));
        assert!(rows[2].trim_end().ends_with('2'));
    }

    #[test]
    fn target_config_file_locates_history() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/a.js", "function a() {}\n")
            .with_file("/proj/.code-monitor.yaml", "output_dir: /custom\n");
        let ctx = ServiceContext::in_memory(fs, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
        let overrides = Overrides { target: PathBuf::from("/proj"), ..Overrides::default() };
        let config = MonitorConfig::load(&ctx, &overrides, |_| None).unwrap();
        assert_eq!(config.output_dir, Path::new("/custom"));
        run_scan(&ctx, &config).unwrap();

        let mut out = Vec::new();
        run(&ctx, Some(Path::new("/proj")), None, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.lines().nth(1).is_some_and(|row| row.starts_with("scan-1")), "{printed}");
    }

    #[test]
    fn missing_target_is_an_error() {
        let ctx = ServiceContext::in_memory(MemoryFileSystem::new(), Utc::now());
        let mut out = Vec::new();
        let err = run(&ctx, Some(Path::new("/nowhere")), None, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "target folder does not exist: /nowhere");
    }
}
