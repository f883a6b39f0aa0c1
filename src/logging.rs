// SPDX-License-Identifier: MPL-2.0
//! Logging setup for the command-line shell.
//!
//! Logs go to stdout. `RUST_LOG` takes precedence when set; otherwise the
//! level is INFO, or DEBUG for this crate when `DEBUG_LOGGING` is set.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Environment variable that turns on debug output for this crate.
pub const DEBUG_LOGGING_ENV: &str = "DEBUG_LOGGING";

/// Filter directive used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        // Debug for this crate, info for dependencies
        "info,poster_stamp=debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber.
///
/// Calling this twice leaves the first subscriber in place.
pub fn init() {
    let debug_logging = std::env::var_os(DEBUG_LOGGING_ENV).is_some();

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_logging)));

    if tracing_subscriber::registry()
        .with(stdout_layer)
        .with(filter)
        .try_init()
        .is_ok()
    {
        tracing::info!(debug_logging, "poster_stamp logging initialized");
    }
}
