//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the vibe-verifier logging system.
///
/// Reads `VIBE_LOG` for per-subsystem log levels, e.g.
/// `VIBE_LOG=vibe_analysis::testing=debug,vibe_analysis::git=warn`.
///
/// Falls back to `default_directive` when `VIBE_LOG` is not set or is invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing_with_default(default_directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}

/// Initialize with the default `vibe=info` filter.
pub fn init_tracing() {
    init_tracing_with_default("vibe=info");
}
