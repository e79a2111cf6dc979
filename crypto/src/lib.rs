//! Cryptographic primitives for hashcash tokens.
//!
//! - **SHA-1 / SHA-256 / SHA-512** digests over the canonical token encoding
//! - A prefix-cached hasher so the search loop only hashes the counter suffix
//! - An OS-backed [`RandomSource`](hashcash_types::RandomSource) for seeds

pub mod hash;
pub mod random;

pub use hash::{digest, digest_hex, PrefixHasher, MAX_DIGEST_LEN};
pub use random::OsRandom;
