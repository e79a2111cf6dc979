//! Hashcash proof-of-work: validation and search.
//!
//! Not mining: a measurable CPU cost attached to an action. A token is valid
//! when the hex digest of its canonical encoding starts with `difficulty`
//! zero digits, so checking costs one hash while minting costs about
//! `16^difficulty`. Minting runs either sequentially ([`search`]) or across a
//! [`WorkerPool`] that splits the counter range between threads.
//!
//! Expiration is a separate, caller-side check
//! ([`Token::is_expired`](hashcash_types::Token::is_expired)).

pub mod cancel;
pub mod config;
pub mod error;
pub mod pool;
pub mod search;
pub mod validator;

pub use cancel::CancelToken;
pub use config::{PoolConfig, DEFAULT_CONCURRENCY, MAX_CONFIG_INTEGER};
pub use error::WorkError;
pub use pool::{partition, PoolResult, WorkerPool};
pub use search::search;
pub use validator::{hash, is_valid, meets_difficulty};
