//! JSON log output filtered by `RUST_LOG`.
//!
//! The listing engine logs input normalisation and mutations at `debug`,
//! URL commits and catalog loads at `info`, and configuration fallbacks at
//! `warn`. Set `RUST_LOG=storefront_filters=debug` to trace a page visit.

use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .with_current_span(false)
        .try_init();
}
