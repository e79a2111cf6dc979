//! Error type for token construction and decoding.

use thiserror::Error;

/// Errors raised while building or parsing a [`Token`](crate::Token).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The wire string is malformed. Always raised before any hashing.
    #[error("invalid token string: {0}")]
    InvalidFormat(String),

    /// The entropy source could not supply the random seed.
    #[error("random generation failed: {0}")]
    RandomGenerationFailed(String),
}
