//! Routing `tracing` output through the test harness.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a subscriber filtered by `RUST_LOG` that writes through the test
/// writer, so output is captured per test.
///
/// Repeated calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
