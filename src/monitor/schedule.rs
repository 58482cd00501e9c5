//! Periodic scanning.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::run_scan;
use crate::config::MonitorConfig;
use crate::context::ServiceContext;
use crate::error::Result;

/// Scans immediately, then every `config.interval()`, until Ctrl-C.
///
/// A failed scan is logged and the loop carries on.
///
/// # Errors
///
/// Returns an error if the runtime cannot be started.
pub fn watch(ctx: &ServiceContext, config: &MonitorConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let scans = runtime.block_on(watch_until(ctx, config, config.interval(), ctrl_c()));
    tracing::info!(scans, "Monitoring stopped");
    Ok(())
}

/// Runs scans every `period`, starting now, until `shutdown` resolves.
/// Returns the number of scans attempted.
pub async fn watch_until<F>(
    ctx: &ServiceContext,
    config: &MonitorConfig,
    period: Duration,
    shutdown: F,
) -> usize
where
    F: Future<Output = ()>,
{
    tracing::info!(
        target_folder = %config.target.display(),
        interval_minutes = config.interval_minutes,
        "Monitoring started, press Ctrl-C to stop"
    );

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut scans = 0;
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = ticker.tick() => {
                scans += 1;
                match run_scan(ctx, config) {
                    Ok(outcome) if outcome.changes.has_changes => {
                        tracing::info!(scan_id = %outcome.snapshot.scan_id, "Changes detected");
                    }
                    Ok(_) => tracing::debug!("No changes"),
                    Err(err) => tracing::error!("Scan failed: {err}"),
                }
            }
        }
    }
    scans
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C, stop the process to end monitoring: {err}");
        std::future::pending::<()>().await;
    }
}
