//! # Enter delay for the show path.
//!
//! [`EnterDelay`] decides how long a freshly mounted controller waits before it reports
//! content as rendered:
//! - [`EnterDelay::Immediate`] rendered on the same call that mounts;
//! - [`EnterDelay::After`] rendered after a fixed duration;
//! - [`EnterDelay::Defer`] rendered at the scheduler's next idle opportunity, bounded by
//!   the configured idle timeout.
//!
//! Millisecond configuration uses `-1` as the deferred sentinel:
//! ```rust
//! use std::time::Duration;
//! use delayvisor::EnterDelay;
//!
//! assert_eq!(EnterDelay::from_millis(-1).unwrap(), EnterDelay::Defer);
//! assert_eq!(EnterDelay::from_millis(0).unwrap(), EnterDelay::Immediate);
//! assert_eq!(
//!     EnterDelay::from_millis(250).unwrap(),
//!     EnterDelay::After(Duration::from_millis(250))
//! );
//! assert!(EnterDelay::from_millis(-7).is_err());
//! ```

use std::time::Duration;

use crate::error::VisibilityError;

/// Wait before `rendered` becomes true after a show request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnterDelay {
    /// Render synchronously (default).
    #[default]
    Immediate,
    /// Render after the given duration. `After(Duration::ZERO)` behaves like `Immediate`.
    After(Duration),
    /// Render at the next idle opportunity, bounded by `Config::idle_timeout`.
    Defer,
}

impl EnterDelay {
    /// Millisecond value that selects [`EnterDelay::Defer`].
    pub const DEFER_SENTINEL: i64 = -1;

    /// Parses a millisecond setting, accepting `-1` as the deferred sentinel.
    ///
    /// Any other negative value is rejected with
    /// [`VisibilityError::InvalidConfiguration`].
    pub fn from_millis(ms: i64) -> Result<Self, VisibilityError> {
        match ms {
            Self::DEFER_SENTINEL => Ok(EnterDelay::Defer),
            0 => Ok(EnterDelay::Immediate),
            n if n > 0 => Ok(EnterDelay::After(Duration::from_millis(n as u64))),
            n => Err(VisibilityError::invalid("enter_delay", n)),
        }
    }

    /// Builds a fixed delay; zero maps to [`EnterDelay::Immediate`].
    #[inline]
    pub fn from_duration(d: Duration) -> Self {
        if d.is_zero() {
            EnterDelay::Immediate
        } else {
            EnterDelay::After(d)
        }
    }

    /// Returns the millisecond form (`-1` for [`EnterDelay::Defer`]).
    pub fn as_millis(&self) -> i64 {
        match self {
            EnterDelay::Immediate => 0,
            EnterDelay::After(d) => d.as_millis().min(i64::MAX as u128) as i64,
            EnterDelay::Defer => Self::DEFER_SENTINEL,
        }
    }

    /// Returns the enter window: the span during which content counts as "not yet shown".
    ///
    /// Only a non-zero fixed delay has a window; immediate and deferred rendering do not.
    #[inline]
    pub fn window(&self) -> Option<Duration> {
        match self {
            EnterDelay::After(d) if !d.is_zero() => Some(*d),
            _ => None,
        }
    }
}
