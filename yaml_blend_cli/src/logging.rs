//! Diagnostic output for the command.
//!
//! Logs go to standard error so they never mix with a merged document
//! written to standard output. `RUST_LOG` takes precedence over `-v`.

use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default filter directive.
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. Later calls leave the first one in place.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
