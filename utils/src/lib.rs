//! Shared utilities for the Agora voting platform.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with};
