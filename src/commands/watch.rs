//! `code-monitor watch` command.

use crate::config::{MonitorConfig, Overrides};
use crate::context::ServiceContext;
use crate::error::Result;
use crate::monitor::schedule;

/// Execute the `watch` command: scan now and then every interval until
/// Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration fails to load or the runtime cannot
/// start. Individual scan failures are logged, not returned.
pub fn run(ctx: &ServiceContext, overrides: &Overrides) -> Result<()> {
    let config = MonitorConfig::from_env(ctx, overrides)?;
    schedule::watch(ctx, &config)
}
