//! Fundamental types for hashcash proof-of-work tokens.
//!
//! This crate defines the token shared by every other crate in the workspace:
//! its fields, the canonical colon-separated wire codec, the closed set of
//! digest algorithms, nanosecond timestamps, and the clock and randomness
//! seams consumed when a fresh token is minted.

pub mod algorithm;
pub mod codec;
pub mod error;
pub mod random;
pub mod time;
pub mod token;

pub use algorithm::Algorithm;
pub use codec::SEPARATOR;
pub use error::TokenError;
pub use random::RandomSource;
pub use time::{Clock, SystemClock, Timestamp};
pub use token::{Token, TokenBuilder, DEFAULT_SEED_LEN, TOKEN_VERSION};
