//! Nullable clock: deterministic time for testing.

use hashcash_types::{Clock, Timestamp};
use std::cell::Cell;
use std::time::Duration;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            current: Cell::new(initial),
        }
    }

    /// Start at a whole number of Unix seconds.
    pub fn at_unix_secs(secs: i64) -> Self {
        Self::new(Timestamp::from_secs(secs))
    }

    /// Advance time by a duration.
    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get().saturating_add(by));
    }

    /// Set the time to a specific value.
    pub fn set(&self, now: Timestamp) {
        self.current.set(now);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        self.current.get()
    }
}
