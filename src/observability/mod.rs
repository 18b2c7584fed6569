//! Tracing initialization.
//!
//! The engine instruments itself with `tracing` events; the embedding app
//! decides where they go. This helper wires a plain fmt subscriber with an
//! `EnvFilter`, which is enough for development and tests.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes a fmt subscriber filtered at `level` (falls back to the
/// `RUST_LOG` environment variable, then `"info"`).
///
/// Idempotent: only the first call per process takes effect.
pub fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    let _ = subscriber.try_init();
}
