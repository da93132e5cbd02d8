//! Structured logging infrastructure for msgsign.
//!
//! Diagnostics always go to stderr: stdout is reserved for the signed
//! response document.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::error::{Error, Result};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system in the requested format.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `info` level.
///
/// # Example
/// ```no_run
/// use msgsign_core::{logging, LogFormat};
///
/// logging::init(LogFormat::Text).unwrap();
/// tracing::info!("Application started");
/// ```
pub fn init(format: LogFormat) -> Result<()> {
    let registry = tracing_subscriber::registry().with(filter());

    let result = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}
