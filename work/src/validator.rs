//! PoW validation.
//!
//! A token is valid when the first `difficulty` hex digits of the digest of
//! its canonical encoding are all `'0'`. This is a hex-digit count, not a bit
//! count: each unit of difficulty is four bits. Expiration is not looked at.

use hashcash_crypto::{digest, digest_hex};
use hashcash_types::Token;

/// Lowercase hex digest of the token's canonical encoding.
pub fn hash(token: &Token) -> String {
    digest_hex(token.algorithm(), token.encode().as_bytes())
}

/// Whether the token satisfies its own difficulty. Never errors.
pub fn is_valid(token: &Token) -> bool {
    let digest = digest(token.algorithm(), token.encode().as_bytes());
    meets_difficulty(&digest, token.difficulty())
}

/// Whether the hex rendering of `digest` starts with `difficulty` `'0'`s.
///
/// Works on raw bytes: a hex digit is `'0'` exactly when its nibble is zero.
/// A difficulty longer than the hex rendering is never met.
pub fn meets_difficulty(digest: &[u8], difficulty: u8) -> bool {
    let digits = usize::from(difficulty);
    if digits > digest.len() * 2 {
        return false;
    }

    let (whole, odd) = (digits / 2, digits % 2 == 1);
    digest[..whole].iter().all(|&b| b == 0) && (!odd || digest[whole] >> 4 == 0)
}
