//! Operating-system entropy for token seeds.

use hashcash_types::{RandomSource, TokenError};

/// [`RandomSource`] backed by the operating system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), TokenError> {
        getrandom::getrandom(buf).map_err(|e| TokenError::RandomGenerationFailed(e.to_string()))
    }
}
