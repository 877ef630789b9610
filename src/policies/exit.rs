//! # Exit policy for the hide path.
//!
//! [`ExitPolicy`] turns the configured exit delay into the delay actually used when
//! content is hidden. The configured value is a nominal upper bound; two shortcuts
//! keep quick show/hide flips from lingering on screen:
//!
//! 1. **Enter window not finished.** With a fixed enter delay `d`, content hidden less
//!    than `d` after it was shown was never rendered, so it unmounts at once.
//! 2. **Bounded flash.** Content hidden less than `exit_delay` after it was shown stays
//!    mounted only as long as it has already been mounted.
//!
//! ```text
//! elapsed = now - mount_started        (None if never shown)
//!
//! None                                  ─► exit_delay
//! enter window d and elapsed < d        ─► 0
//! exit_delay > 0 and elapsed < exit     ─► elapsed
//! otherwise                             ─► exit_delay
//! ```
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use delayvisor::{EnterDelay, ExitPolicy};
//!
//! let policy = ExitPolicy {
//!     enter: EnterDelay::Immediate,
//!     exit: Duration::from_millis(1000),
//! };
//!
//! // Shown for 50ms, hidden: linger for 50ms rather than the full second.
//! assert_eq!(
//!     policy.effective_delay(Some(Duration::from_millis(50))),
//!     Duration::from_millis(50)
//! );
//! ```

use std::time::Duration;

use crate::policies::enter::EnterDelay;

/// Computes the effective unmount delay for a hide request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitPolicy {
    /// Enter delay in force at the time of the hide request.
    pub enter: EnterDelay,
    /// Configured (nominal) exit delay.
    pub exit: Duration,
}

impl ExitPolicy {
    /// Returns the delay before `mounted` becomes false.
    ///
    /// `elapsed` is the time since the most recent show request, or `None` if the
    /// controller has never been shown.
    pub fn effective_delay(&self, elapsed: Option<Duration>) -> Duration {
        let Some(elapsed) = elapsed else {
            return self.exit;
        };

        match self.enter.window() {
            Some(window) if elapsed < window => Duration::ZERO,
            _ if !self.exit.is_zero() && elapsed < self.exit => elapsed,
            _ => self.exit,
        }
    }
}
