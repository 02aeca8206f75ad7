use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::config::{LogConfig, LogFormat};

const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs the global subscriber: an [`EnvFilter`] and a `fmt` layer writing
/// to stderr, either human readable or JSON.
///
/// The filter comes from `--log-level`/`CHRONID_LOG` when given, otherwise
/// `RUST_LOG`, otherwise `warn`.
pub fn init_telemetry(config: &LogConfig) -> anyhow::Result<()> {
    let filter = build_filter(config.level.as_deref())?;

    let (pretty, json) = match config.format {
        LogFormat::Pretty => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_target(false)
                    .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                    .with_file(true)
                    .pretty(),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                    .json(),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()
        .context("failed to install the tracing subscriber")
}

fn build_filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level directive `{directive}`")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))),
    }
}
