//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging to stderr, leaving stdout for command output.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with
/// `verbose`.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if verbose { "debug" } else { "warn" };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
