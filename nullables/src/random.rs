//! Nullable random: deterministic seed bytes.

use hashcash_types::{RandomSource, TokenError};
use std::sync::Mutex;

/// A deterministic random source for testing.
///
/// Cycles through a fixed byte pattern, continuing where the previous call
/// stopped. A failing instance reports `RandomGenerationFailed` every time.
pub struct NullRandom {
    pattern: Vec<u8>,
    position: Mutex<usize>,
    failure: Option<String>,
}

impl NullRandom {
    /// Create with a byte pattern that is repeated as needed.
    pub fn new(pattern: Vec<u8>) -> Self {
        Self {
            pattern,
            position: Mutex::new(0),
            failure: None,
        }
    }

    /// Every byte drawn is `byte`.
    pub fn repeating(byte: u8) -> Self {
        Self::new(vec![byte])
    }

    /// A source that always fails with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            pattern: Vec::new(),
            position: Mutex::new(0),
            failure: Some(reason.into()),
        }
    }
}

impl RandomSource for NullRandom {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), TokenError> {
        if let Some(reason) = &self.failure {
            return Err(TokenError::RandomGenerationFailed(reason.clone()));
        }
        if self.pattern.is_empty() {
            buf.fill(0);
            return Ok(());
        }

        let mut position = self.position.lock().unwrap_or_else(|e| e.into_inner());
        for byte in buf.iter_mut() {
            *byte = self.pattern[*position % self.pattern.len()];
            *position += 1;
        }
        Ok(())
    }
}
