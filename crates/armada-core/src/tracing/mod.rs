//! Observability for armada.
//! `tracing` with `EnvFilter`, per-crate log levels, structured events.

pub mod events;
pub mod fields;
pub mod setup;

pub use setup::{init_tracing, init_tracing_json};
