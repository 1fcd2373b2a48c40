pub mod mock;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, prelude::*};

static INIT_LOGGING: Once = Once::new();

/// Route `log` and `tracing` events to the test output, once per process.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,ui_state=debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .without_time();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();

        tracing::info!("Initialized test logs");
    });
}
