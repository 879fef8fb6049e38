//! Tracing subscriber installation for the binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a formatted subscriber on stderr.
///
/// `verbose` forces the `debug` level; otherwise `RUST_LOG` applies,
/// defaulting to `info`.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
}
