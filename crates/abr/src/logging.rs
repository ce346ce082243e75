#![forbid(unsafe_code)]

//! Global tracing subscriber setup.
//!
//! Filtering follows `RUST_LOG` when set (for example
//! `RUST_LOG=abr_runtime=debug,abr_i18n=trace`), otherwise the level passed
//! to [`init_with_default`]. The JSON format emits one object per event,
//! including the active span stack (`carousel.render`, `page.step`, ...).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{Error, Result};

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Newline-delimited JSON for log shippers.
    Json,
}

/// Install the global subscriber with an `info` default.
pub fn init(format: LogFormat) -> Result<()> {
    init_with_default(format, "info")
}

/// Install the global subscriber, falling back to `default_directive` when
/// `RUST_LOG` is unset or invalid.
pub fn init_with_default(format: LogFormat, default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|err| Error::Logging(err.to_string()))?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true).with_span_list(true))
            .try_init(),
    };
    installed.map_err(|err| Error::Logging(err.to_string()))
}
