//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so that stdout stays clean for tables, JSON and TOML.
//! `RUST_LOG` overrides the level chosen from `-v`.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format.
    #[default]
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Default directives for a verbosity count.
///
/// - 0: info for our crates, warn for everything else
/// - 1 (`-v`): debug
/// - 2+ (`-vv`): trace
pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,cabinet=info,cabinet_core=info",
        1 => "warn,cabinet=debug,cabinet_core=debug",
        _ => "info,cabinet=trace,cabinet_core=trace",
    }
}

pub fn init_logging(verbosity: u8, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time()
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init(),
    };
    result.map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
