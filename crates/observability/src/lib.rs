//! Process-wide tracing setup shared by hosts, tests and benches.

/// Install the JSON tracing subscriber.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber construction and filtering.
pub mod tracing;
