//! Cooperative cancellation shared between a caller and search workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::WorkError;

/// Broadcast stop signal with an optional deadline.
///
/// Clones share one flag. A child observes its parent's cancellation and
/// deadline, but cancelling a child never reaches the parent. Deadline expiry
/// and [`cancel`](Self::cancel) are indistinguishable to searchers: both
/// make [`check`](Self::check) return [`WorkError::Cancelled`].
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
    parent: Option<CancelToken>,
}

impl CancelToken {
    /// A token that is only cancelled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A root token that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                deadline: Instant::now().checked_add(timeout),
                ..Inner::default()
            }),
        }
    }

    /// A token cancelled whenever `self` is, or on its own.
    pub fn child(&self) -> Self {
        self.derive(None)
    }

    /// Like [`child`](Self::child), additionally expiring `timeout` from now.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        self.derive(Instant::now().checked_add(timeout))
    }

    fn derive(&self, deadline: Option<Instant>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                deadline,
                parent: Some(self.clone()),
            }),
        }
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.inner.cancelled.load(Ordering::Acquire) {
            return true;
        }
        if self
            .inner
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            return true;
        }
        self.inner
            .parent
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
    }

    /// `Err(WorkError::Cancelled)` once cancelled or past the deadline.
    pub fn check(&self) -> Result<(), WorkError> {
        if self.is_cancelled() {
            Err(WorkError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// This token's own deadline, ignoring ancestors.
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }
}
