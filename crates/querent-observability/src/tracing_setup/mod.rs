//! Tracing setup: structured logging with span definitions.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use querent_core::config::ObservabilityConfig;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "QUERENT_LOG";

static INIT: Once = Once::new();

/// Initialize tracing with human-readable output.
///
/// Respects `QUERENT_LOG` (e.g. `QUERENT_LOG=querent_cache=debug,info`),
/// defaulting to `info`. Idempotent; the first call wins.
pub fn init_tracing() {
    install(None, false);
}

/// Initialize tracing from configuration. `QUERENT_LOG` still takes
/// precedence over `config.log_level`.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    install(Some(&config.log_level), config.json);
}

/// Initialize tracing with an explicit filter, ignoring the environment.
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(EnvFilter::new(filter))
            .try_init();
    });
}

fn install(default_level: Option<&str>, json: bool) {
    INIT.call_once(|| {
        let fallback = default_level.unwrap_or("info");
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        // try_init: a host application may already own the global subscriber.
        let result = if json {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        };
        if result.is_ok() {
            tracing::debug!(json, "tracing initialized");
        }
    });
}
