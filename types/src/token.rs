//! The hashcash token and its construction.

use std::time::Duration;

use crate::{Algorithm, Clock, RandomSource, Timestamp, TokenError};

/// Current wire format version.
pub const TOKEN_VERSION: u8 = 1;

/// Number of random seed bytes drawn for a new token.
pub const DEFAULT_SEED_LEN: usize = 10;

/// A hashcash proof-of-work token.
///
/// A fresh token has `counter == 0` and is almost never valid; the search
/// engines advance the counter until the digest of the canonical encoding
/// starts with `difficulty` zero hex digits. A verifier decodes the wire
/// string back into an equal `Token` and re-runs the check without searching.
///
/// `difficulty` counts hex digits, not bits: each unit is four bits of work.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    version: u8,
    difficulty: u8,
    expiration: Timestamp,
    resource: Vec<u8>,
    algorithm: Algorithm,
    random_seed: Vec<u8>,
    counter: u64,
}

impl Token {
    /// Mint a fresh sha-1 token for `resource` that expires `ttl` from now.
    pub fn new<C, R>(
        resource: impl AsRef<[u8]>,
        difficulty: u8,
        ttl: Duration,
        clock: &C,
        random: &R,
    ) -> Result<Self, TokenError>
    where
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        Self::builder(resource, difficulty, ttl).build(clock, random)
    }

    /// Start building a fresh token with non-default algorithm or seed length.
    pub fn builder(resource: impl AsRef<[u8]>, difficulty: u8, ttl: Duration) -> TokenBuilder {
        TokenBuilder {
            resource: resource.as_ref().to_vec(),
            difficulty,
            ttl,
            algorithm: Algorithm::default(),
            seed_len: DEFAULT_SEED_LEN,
        }
    }

    /// Assemble a token from already-known field values, e.g. a decoded one.
    pub fn from_parts(
        version: u8,
        difficulty: u8,
        expiration: Timestamp,
        resource: Vec<u8>,
        algorithm: Algorithm,
        random_seed: Vec<u8>,
        counter: u64,
    ) -> Self {
        Self {
            version,
            difficulty,
            expiration,
            resource,
            algorithm,
            random_seed,
            counter,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    pub fn resource(&self) -> &[u8] {
        &self.resource
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn random_seed(&self) -> &[u8] {
        &self.random_seed
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn set_counter(&mut self, counter: u64) {
        self.counter = counter;
    }

    pub fn with_counter(mut self, counter: u64) -> Self {
        self.counter = counter;
        self
    }

    /// Whether `now` is past the token's expiration.
    ///
    /// Proof-of-work validity does not look at expiration; verifiers must
    /// call this separately.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiration.has_passed(now)
    }
}

/// Builder for a fresh, unsolved [`Token`].
#[derive(Clone, Debug)]
pub struct TokenBuilder {
    resource: Vec<u8>,
    difficulty: u8,
    ttl: Duration,
    algorithm: Algorithm,
    seed_len: usize,
}

impl TokenBuilder {
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn seed_len(mut self, seed_len: usize) -> Self {
        self.seed_len = seed_len;
        self
    }

    /// Draw the seed, stamp the expiration, and produce a token with counter 0.
    pub fn build<C, R>(self, clock: &C, random: &R) -> Result<Token, TokenError>
    where
        C: Clock + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut random_seed = vec![0u8; self.seed_len];
        random.fill_bytes(&mut random_seed)?;

        Ok(Token {
            version: TOKEN_VERSION,
            difficulty: self.difficulty,
            expiration: clock.now().saturating_add(self.ttl),
            resource: self.resource,
            algorithm: self.algorithm,
            random_seed,
            counter: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    struct Fill(u8);

    impl RandomSource for Fill {
        fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), TokenError> {
            buf.fill(self.0);
            Ok(())
        }
    }

    struct Broken;

    impl RandomSource for Broken {
        fn fill_bytes(&self, _buf: &mut [u8]) -> Result<(), TokenError> {
            Err(TokenError::RandomGenerationFailed("entropy pool empty".into()))
        }
    }

    #[test]
    fn new_token_starts_unsolved() {
        let clock = FixedClock(Timestamp::from_secs(10));
        let token = Token::new("a@b.c", 4, Duration::from_secs(5), &clock, &Fill(7)).unwrap();
        assert_eq!(token.version(), TOKEN_VERSION);
        assert_eq!(token.difficulty(), 4);
        assert_eq!(token.counter(), 0);
        assert_eq!(token.resource(), b"a@b.c");
        assert_eq!(token.algorithm(), Algorithm::Sha1);
        assert_eq!(token.random_seed(), &[7u8; DEFAULT_SEED_LEN]);
        assert_eq!(token.expiration(), Timestamp::from_secs(15));
    }

    #[test]
    fn builder_overrides_algorithm_and_seed_len() {
        let clock = FixedClock(Timestamp::EPOCH);
        let token = Token::builder("r", 2, Duration::ZERO)
            .algorithm(Algorithm::Sha512)
            .seed_len(16)
            .build(&clock, &Fill(1))
            .unwrap();
        assert_eq!(token.algorithm(), Algorithm::Sha512);
        assert_eq!(token.random_seed().len(), 16);
    }

    #[test]
    fn random_failure_aborts_construction() {
        let clock = FixedClock(Timestamp::EPOCH);
        let err = Token::new("r", 1, Duration::ZERO, &clock, &Broken).unwrap_err();
        assert!(matches!(err, TokenError::RandomGenerationFailed(_)));
    }

    #[test]
    fn expiration_is_caller_checked() {
        let clock = FixedClock(Timestamp::from_secs(100));
        let token = Token::new("r", 1, Duration::from_secs(30), &clock, &Fill(0)).unwrap();
        assert!(!token.is_expired(Timestamp::from_secs(130)));
        assert!(token.is_expired(Timestamp::from_secs(131)));
    }

    #[test]
    fn with_counter_only_touches_counter() {
        let clock = FixedClock(Timestamp::EPOCH);
        let token = Token::new("r", 1, Duration::ZERO, &clock, &Fill(0)).unwrap();
        let moved = token.clone().with_counter(99);
        assert_eq!(moved.counter(), 99);
        assert_eq!(moved.clone().with_counter(0), token);
    }
}
