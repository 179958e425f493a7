//! Cancellation and deadline context for supervised invocations.
//!
//! An [`ExecContext`] bounds one or more invocations with an optional
//! absolute deadline and an explicit cancellation handle. Stream reads,
//! the reap step, and the final result resolution all consult the same
//! context, so a spent context is reported consistently everywhere.

use std::fmt;
use tokio::time::{Duration, Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Why a context stopped being usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    /// The context's deadline elapsed.
    DeadlineExceeded,
    /// The context was explicitly cancelled.
    Cancelled,
}

impl fmt::Display for CancelCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelCause::DeadlineExceeded => write!(f, "deadline exceeded"),
            CancelCause::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A cancellable context with an optional absolute deadline.
///
/// Cloning is cheap; clones share the same cancellation state.
#[derive(Debug, Clone)]
pub struct ExecContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl ExecContext {
    /// A context with no deadline. It only expires if [`cancel`] is called.
    ///
    /// [`cancel`]: ExecContext::cancel
    pub fn unbounded() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// A context that expires at the given instant.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// A context that expires after the given duration.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// The absolute deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Explicitly cancel the context. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The context's error state: `None` while it is still live, otherwise
    /// the cause that ended it. The deadline is checked before the
    /// cancellation flag so that a timed-out operation is reported as
    /// deadline-exceeded.
    pub fn cause(&self) -> Option<CancelCause> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(CancelCause::DeadlineExceeded);
            }
        }
        if self.token.is_cancelled() {
            return Some(CancelCause::Cancelled);
        }
        None
    }

    /// Resolves once the deadline elapses or the context is cancelled.
    /// Never resolves for a live unbounded context.
    pub async fn expired(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }
}

impl Default for ExecContext {
    fn default() -> Self {
        Self::unbounded()
    }
}
