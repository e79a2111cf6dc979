//! Shared utilities for the hashcash crates.

pub mod logging;

pub use logging::{init_logging, init_test_logging, LogFormat};
