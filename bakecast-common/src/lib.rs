//! Shared plumbing for the bakecast crates.
//!
//! - [`observability`]: centralised tracing/logging initialisation
pub mod observability;

pub use observability::{LogConfig, LogFormat, init_logging};
