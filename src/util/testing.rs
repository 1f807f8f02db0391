//! Test support: one-time tracing setup

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install a test-captured subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `leitfaden=debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leitfaden=debug"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("tracing subscriber already set");
        } else if let Err(e) = subscriber.try_init() {
            eprintln!("Error: failed to set up test logging: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_test_setup();
        init_test_setup();
    }
}
