//! # Owned, cancellable timer handle.
//!
//! [`TimerHandle`] wraps a [`CancellationToken`] shared with the scheduled job. The job
//! runs only while the token is live; dropping or cancelling the handle cancels it.
//!
//! ## Rules
//! - Cancelling is idempotent and safe after the job has already run.
//! - Handles are not `Clone`: exactly one owner decides when the timer dies.

use tokio_util::sync::CancellationToken;

/// Owned handle to a scheduled job.
#[derive(Debug)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    /// Wraps the token the scheduler uses to gate the job.
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Cancels the job if it has not run yet.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once the handle has been cancelled (explicitly or by drop of a clone owner).
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
