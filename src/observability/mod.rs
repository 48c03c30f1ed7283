//! Observability and telemetry.
//!
//! Logging goes through `tracing`; the binary initializes a single global
//! subscriber at startup. Metrics are emitted through the `metrics` facade
//! on the interpretation path and are no-ops unless the host installs a
//! recorder.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Initializes process-wide logging.
///
/// The filter level comes from `LOG_LEVEL` (default `INFO`); an explicit
/// `RUST_LOG` takes precedence, and `--verbose` forces `debug`. Safe to
/// call more than once; only the first call installs the subscriber.
pub fn init_logging(verbose: bool) {
    if LOGGING_INIT.get().is_some() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose {
            "debug".to_string()
        } else {
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "INFO".to_string())
                .to_lowercase()
        };
        EnvFilter::new(level)
    });

    // try_init: a subscriber may already be installed by a test harness
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();

    let _ = LOGGING_INIT.set(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging(false);
        init_logging(true);
    }
}
