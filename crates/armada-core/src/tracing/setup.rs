//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "armada=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("ARMADA_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize human-readable logging.
///
/// Reads `ARMADA_LOG` for per-crate levels, e.g.
/// `ARMADA_LOG=armada_planner=debug,armada_bandit=info`.
/// Falls back to `armada=info`. Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter())
            .init();
    });
}

/// Initialize JSON logging for machine consumption. Idempotent, and a
/// no-op if [`init_tracing`] already ran.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_target(true))
            .with(env_filter())
            .init();
    });
}
