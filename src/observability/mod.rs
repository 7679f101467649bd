//! Logging setup for the `qualitybar` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or the embedding application).
//!
//! Log filtering reads `QUALITYBAR_LOG` using `EnvFilter` directives, e.g.
//! `QUALITYBAR_LOG=qualitybar::ledger=debug`. Without it, the level comes
//! from the `-v` count.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding filter directives
pub const LOG_ENV_VAR: &str = "QUALITYBAR_LOG";

static INIT: Once = Once::new();

/// Default filter directive for a given `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "qualitybar=warn",
        1 => "qualitybar=info",
        2 => "qualitybar=debug",
        _ => "qualitybar=trace",
    }
}

/// Install the stderr subscriber. Idempotent.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();

        if let Err(e) = installed {
            eprintln!("Note: tracing subscriber already installed: {}", e);
        }
    });
}
