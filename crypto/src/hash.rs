//! Digest functions for the closed algorithm set.

use hashcash_types::Algorithm;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

/// Largest digest produced by any supported algorithm (SHA-512).
pub const MAX_DIGEST_LEN: usize = 64;

/// Compute the digest of `data` with the given algorithm.
pub fn digest(algorithm: Algorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Sha1 => Sha1::digest(data).to_vec(),
        Algorithm::Sha256 => Sha256::digest(data).to_vec(),
        Algorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Lowercase hex of [`digest`].
pub fn digest_hex(algorithm: Algorithm, data: &[u8]) -> String {
    hex::encode(digest(algorithm, data))
}

/// Hash state with a fixed prefix already absorbed.
///
/// Every search attempt shares the token's encoding up to the counter, so the
/// prefix is hashed once and each attempt clones the state and feeds only the
/// counter digits. No heap allocation per attempt.
#[derive(Clone)]
pub enum PrefixHasher {
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl PrefixHasher {
    pub fn new(algorithm: Algorithm, prefix: &[u8]) -> Self {
        match algorithm {
            Algorithm::Sha1 => Self::Sha1(Sha1::new_with_prefix(prefix)),
            Algorithm::Sha256 => Self::Sha256(Sha256::new_with_prefix(prefix)),
            Algorithm::Sha512 => Self::Sha512(Sha512::new_with_prefix(prefix)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Sha1(_) => Algorithm::Sha1,
            Self::Sha256(_) => Algorithm::Sha256,
            Self::Sha512(_) => Algorithm::Sha512,
        }
    }

    /// Digest of `prefix || suffix`, written into `out`.
    ///
    /// Returns the filled part of `out` (the algorithm's digest length).
    pub fn finish_with<'a>(&self, suffix: &[u8], out: &'a mut [u8; MAX_DIGEST_LEN]) -> &'a [u8] {
        match self {
            Self::Sha1(state) => finish(state, suffix, out),
            Self::Sha256(state) => finish(state, suffix, out),
            Self::Sha512(state) => finish(state, suffix, out),
        }
    }
}

fn finish<'a, D>(state: &D, suffix: &[u8], out: &'a mut [u8; MAX_DIGEST_LEN]) -> &'a [u8]
where
    D: Digest + Clone,
{
    let len = <D as Digest>::output_size();
    let result = state.clone().chain_update(suffix).finalize();
    out[..len].copy_from_slice(&result);
    &out[..len]
}
