//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "CODE_MONITOR_LOG";

/// Default filter directive for the given verbosity.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Installs a stderr `fmt` subscriber filtered by `CODE_MONITOR_LOG`,
/// falling back to `info` (or `debug` when `verbose`).
///
/// Calling it again after a subscriber is installed has no effect.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = Registry::default().with(filter).with(layer).try_init();
}
