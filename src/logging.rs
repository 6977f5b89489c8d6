//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`, so command output on stdout
//! stays clean for piping. The filter comes from `LAJAN_LOG` when set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV_VAR: &str = "LAJAN_LOG";

/// Default directive for a given verbosity level (number of `-v` flags)
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "lajan=warn",
        1 => "lajan=info",
        2 => "lajan=debug",
        _ => "lajan=trace",
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| default_directive(verbosity).into());

    // A second init (e.g. in tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
