//! Partitioned parallel search (worker pool).
//!
//! The counter span `[token.counter(), max_iterations]` is split into
//! contiguous disjoint ranges, one per worker. Workers run the sequential
//! search over their own range on a private copy of the token and share one
//! cancellation token. The first worker to succeed claims a `OnceLock` slot
//! and cancels the rest; a later finisher finds the slot taken and drops its
//! result. Nothing ever blocks on delivery.
//!
//! The rayon pool is scoped, so every worker thread has been joined by the
//! time [`WorkerPool::search`] returns, whatever the outcome.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use hashcash_types::Token;
use tracing::debug;

use crate::search::{ensure_reachable, search_until};
use crate::{CancelToken, PoolConfig, WorkError};

/// A successful pooled search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolResult {
    /// The solved token.
    pub token: Token,
    /// Wall-clock time from pool start until the winner found it.
    pub elapsed: Duration,
}

/// Runs a search across a fixed number of concurrent workers.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    config: PoolConfig,
}

impl WorkerPool {
    /// Fails with [`WorkError::InvalidConfig`] for zero workers or an
    /// unbounded counter range.
    pub fn new(config: PoolConfig) -> Result<Self, WorkError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Search for a valid counter in `[token.counter(), max_iterations]`.
    ///
    /// Cancelling `cancel`, or the configured timeout elapsing, before any
    /// worker succeeds yields [`WorkError::Cancelled`]. Exhausting every range
    /// yields [`WorkError::TooManyIterations`]. Which range wins when several
    /// contain a valid counter is not specified.
    pub fn search(&self, token: &Token, cancel: &CancelToken) -> Result<PoolResult, WorkError> {
        let max_counter = self.config.max_iterations;
        ensure_reachable(token, Some(max_counter))?;
        let ranges = partition(token.counter(), max_counter, self.config.concurrency);
        if ranges.is_empty() {
            return Err(WorkError::TooManyIterations { max_counter });
        }

        let scope_cancel = match self.config.timeout() {
            Some(timeout) => cancel.child_with_timeout(timeout),
            None => cancel.child(),
        };
        let winner: OnceLock<PoolResult> = OnceLock::new();
        let interrupted = AtomicBool::new(false);
        let start = Instant::now();

        debug!(
            workers = ranges.len(),
            start = token.counter(),
            max_counter,
            difficulty = token.difficulty(),
            "starting pooled search"
        );

        rayon::ThreadPoolBuilder::new()
            .num_threads(ranges.len())
            .thread_name(|i| format!("hashcash-worker-{i}"))
            .build_scoped(
                |thread| thread.run(),
                |pool| {
                    pool.scope(|scope| {
                        for range in &ranges {
                            let chunk = token.clone().with_counter(*range.start());
                            let end = *range.end();
                            let (winner, interrupted, scope_cancel) =
                                (&winner, &interrupted, &scope_cancel);

                            scope.spawn(move |_| {
                                match search_until(chunk, Some(end), scope_cancel) {
                                    Ok(found) => {
                                        let result = PoolResult {
                                            token: found,
                                            elapsed: start.elapsed(),
                                        };
                                        if winner.set(result).is_ok() {
                                            scope_cancel.cancel();
                                        }
                                    }
                                    Err(WorkError::Cancelled) => {
                                        interrupted.store(true, Ordering::Relaxed);
                                    }
                                    Err(_) => {}
                                }
                            });
                        }
                    })
                },
            )
            .map_err(|e| WorkError::ThreadPool(e.to_string()))?;

        if let Some(result) = winner.into_inner() {
            debug!(
                counter = result.token.counter(),
                elapsed = ?result.elapsed,
                "pooled search succeeded"
            );
            return Ok(result);
        }

        if interrupted.load(Ordering::Relaxed) {
            debug!(elapsed = ?start.elapsed(), "pooled search cancelled");
            return Err(WorkError::Cancelled);
        }

        debug!(max_counter, "pooled search exhausted its range");
        Err(WorkError::TooManyIterations { max_counter })
    }
}

/// Split `[start, max_counter]` into at most `workers` contiguous ranges.
///
/// Ranges are disjoint, ascending, and their union is exactly the span. Every
/// range but the last has `len / n` counters; the last absorbs the remainder.
/// When the span is shorter than `workers`, one range per counter is made.
/// Returns no ranges when `start > max_counter` or `workers == 0`.
pub fn partition(start: u64, max_counter: u64, workers: usize) -> Vec<RangeInclusive<u64>> {
    if start > max_counter || workers == 0 {
        return Vec::new();
    }

    let span = u128::from(max_counter - start) + 1;
    let count = span.min(workers as u128);
    let chunk = span / count;

    (0..count)
        .map(|i| {
            let lo = u128::from(start) + i * chunk;
            let hi = if i + 1 == count {
                u128::from(max_counter)
            } else {
                lo + chunk - 1
            };
            // Both bounds lie within [start, max_counter].
            (lo as u64)..=(hi as u64)
        })
        .collect()
}
