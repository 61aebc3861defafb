//! Logging setup
//!
//! `RUST_LOG` takes precedence over the level passed on the command line.
//! Log lines go to stderr so stdout carries only command output.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Build the filter: `RUST_LOG` if set and valid, else `level`, else info
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build a subscriber that writes formatted lines to `writer`
pub fn subscriber<W>(
    level: &str,
    format: LogFormat,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = env_filter(level);

    match format {
        LogFormat::Json => Box::new(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .json()
                    .with_thread_ids(true)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Plain => Box::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(writer)),
        ),
    }
}

/// Install the global stderr subscriber. Later calls are ignored.
pub fn init_logging(level: &str, format: LogFormat) {
    if subscriber(level, format, std::io::stderr).try_init().is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
