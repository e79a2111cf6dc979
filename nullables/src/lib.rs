//! Nullable infrastructure for deterministic testing.
//!
//! Token construction consumes two external collaborators, a clock and an
//! entropy source, through the [`Clock`](hashcash_types::Clock) and
//! [`RandomSource`](hashcash_types::RandomSource) traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Can be told to fail
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod random;

pub use clock::NullClock;
pub use random::NullRandom;
