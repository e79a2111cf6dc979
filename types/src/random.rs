//! Randomness seam used to draw a token's seed.

use crate::TokenError;

/// Supplies the random seed bytes of a freshly minted token.
///
/// Failures surface as [`TokenError::RandomGenerationFailed`] and abort the
/// construction; nothing retries.
pub trait RandomSource {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), TokenError>;
}
