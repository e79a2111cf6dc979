//! Sequential brute-force search over the token counter.

use hashcash_crypto::{PrefixHasher, MAX_DIGEST_LEN};
use hashcash_types::Token;
use tracing::{debug, trace};

use crate::validator::meets_difficulty;
use crate::{CancelToken, WorkError};

/// Advance the counter until the token is valid.
///
/// `max_iterations` is an inclusive bound on the counter value itself, not a
/// count of attempts, so a token whose counter is already past the bound
/// fails immediately. `0` means unbounded. `cancel` is checked before every
/// hash attempt.
///
/// On success the returned token carries the first valid counter at or
/// above the starting one.
pub fn search(token: Token, max_iterations: u64, cancel: &CancelToken) -> Result<Token, WorkError> {
    let end = (max_iterations > 0).then_some(max_iterations);
    search_until(token, end, cancel)
}

/// Search `[token.counter(), end]`, or to `u64::MAX` when `end` is `None`.
pub(crate) fn search_until(
    mut token: Token,
    end: Option<u64>,
    cancel: &CancelToken,
) -> Result<Token, WorkError> {
    ensure_reachable(&token, end)?;

    let limit = end.unwrap_or(u64::MAX);
    let difficulty = token.difficulty();
    let hasher = PrefixHasher::new(token.algorithm(), token.encode_prefix().as_bytes());
    let mut digits = [0u8; 20];
    let mut out = [0u8; MAX_DIGEST_LEN];
    let mut counter = token.counter();

    trace!(start = counter, end = ?end, difficulty, "searching counter range");

    while counter <= limit {
        cancel.check()?;

        let digest = hasher.finish_with(decimal(counter, &mut digits), &mut out);
        if meets_difficulty(digest, difficulty) {
            let attempts = (counter - token.counter()).saturating_add(1);
            debug!(counter, attempts, "found valid counter");
            token.set_counter(counter);
            return Ok(token);
        }

        match counter.checked_add(1) {
            Some(next) => counter = next,
            None => break,
        }
    }

    Err(WorkError::TooManyIterations { max_counter: limit })
}

/// Reject difficulties no digest of this algorithm can ever meet.
///
/// A bounded search reports this as exhausting its bound. Only an unbounded
/// search, which would otherwise never end, gets `UnreachableDifficulty`.
pub(crate) fn ensure_reachable(token: &Token, end: Option<u64>) -> Result<(), WorkError> {
    let max = token.algorithm().hex_len();
    if usize::from(token.difficulty()) > max {
        if let Some(max_counter) = end {
            return Err(WorkError::TooManyIterations { max_counter });
        }
        return Err(WorkError::UnreachableDifficulty {
            difficulty: token.difficulty(),
            max,
        });
    }
    Ok(())
}

/// ASCII decimal digits of `value`, written right-aligned into `buf`.
fn decimal(mut value: u64, buf: &mut [u8; 20]) -> &[u8] {
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            return &buf[start..];
        }
    }
}
