//! Logging setup for the command line front end
//!
//! Logs go to stderr so that reports written to stdout stay valid JSON. `RUST_LOG`
//! overrides the default `info` level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Initialize the global subscriber
pub fn setup_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    #[cfg(feature = "profiling")]
    tracing::info!("Logging initialized with profiling scopes");
    #[cfg(not(feature = "profiling"))]
    tracing::debug!("Logging initialized (profiling disabled in this build)");
}
