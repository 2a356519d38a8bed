//! Log output for the managed side.
//!
//! The core writes its own log file; this only covers events emitted by the
//! bridge and decoder.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install a global fmt subscriber filtered by `directive`.
///
/// `RUST_LOG`, when set, takes precedence. An unparsable directive falls back
/// to `info`. Returns `false` if a global subscriber was already installed,
/// which makes repeat calls harmless.
pub fn init(directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(directive))
        .try_init()
        .is_ok()
}

/// [`init`] with the configured directive.
pub fn init_from_config(config: &LoggingConfig) -> bool {
    init(&config.filter)
}

fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
