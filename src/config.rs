//! # Controller configuration.
//!
//! Provides [`Config`], the settings a [`VisibilityController`](crate::VisibilityController)
//! reads on every transition.
//!
//! Config is used in two ways:
//! 1. **Construction**: `VisibilityController::new(config, scheduler, active)` or the builder;
//! 2. **Replacement**: `VisibilityController::set_config(config)`, effective on the next transition.
//!
//! ## Sentinel values
//! - `enter_delay = -1` (millisecond form) → [`EnterDelay::Defer`]
//! - `enter_delay = 0` → [`EnterDelay::Immediate`]
//! - `exit_delay = 0s` → unmount synchronously on hide
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use delayvisor::{Config, EnterDelay};
//!
//! let cfg = Config::from_millis(-1, 300)?;
//! assert_eq!(cfg.enter_delay, EnterDelay::Defer);
//! assert_eq!(cfg.exit_delay, Duration::from_millis(300));
//!
//! assert!(Config::from_millis(0, -5).is_err());
//! # Ok::<(), delayvisor::VisibilityError>(())
//! ```

use std::time::Duration;

use crate::error::VisibilityError;
use crate::policies::{EnterDelay, ExitPolicy, IdleFallback};

/// Settings for a single visibility controller.
///
/// ## Field semantics
/// - `enter_delay`: wait before `rendered` becomes true after a show request
/// - `exit_delay`: nominal wait before `mounted` becomes false after a hide request
/// - `idle_timeout`: ceiling for deferred rendering (must be `> 0`)
/// - `idle_fallback`: timer used for deferred rendering when the scheduler has no idle class
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
///
/// ## Notes
/// All fields are public. Values built by hand are checked with [`Config::validate`]
/// when handed to a controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Wait before content is reported rendered.
    pub enter_delay: EnterDelay,

    /// Nominal wait before content is unmounted.
    ///
    /// The effective value is computed per hide request by [`ExitPolicy`] and is never
    /// larger than this.
    pub exit_delay: Duration,

    /// Maximum wait for an idle opportunity when `enter_delay` is [`EnterDelay::Defer`].
    pub idle_timeout: Duration,

    /// Replacement timer for deferred rendering on schedulers without idle support.
    pub idle_fallback: IdleFallback,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind by more than `bus_capacity` events observe `Lagged`.
    pub bus_capacity: usize,
}

impl Config {
    /// Default ceiling for deferred rendering.
    pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(100);

    /// Builds a config from millisecond values, accepting `-1` as the deferred enter sentinel.
    ///
    /// Every other option keeps its default.
    pub fn from_millis(enter_delay: i64, exit_delay: i64) -> Result<Self, VisibilityError> {
        let enter_delay = EnterDelay::from_millis(enter_delay)?;
        if exit_delay < 0 {
            return Err(VisibilityError::invalid("exit_delay", exit_delay));
        }
        Ok(Self {
            enter_delay,
            exit_delay: Duration::from_millis(exit_delay as u64),
            ..Self::default()
        })
    }

    /// Sets the enter delay.
    #[must_use]
    pub fn with_enter_delay(mut self, enter_delay: EnterDelay) -> Self {
        self.enter_delay = enter_delay;
        self
    }

    /// Sets the exit delay.
    #[must_use]
    pub fn with_exit_delay(mut self, exit_delay: Duration) -> Self {
        self.exit_delay = exit_delay;
        self
    }

    /// Sets the idle timeout used by deferred rendering.
    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Sets the fallback used when the scheduler has no idle class.
    #[must_use]
    pub fn with_idle_fallback(mut self, idle_fallback: IdleFallback) -> Self {
        self.idle_fallback = idle_fallback;
        self
    }

    /// Checks invariants that the typed fields cannot express.
    ///
    /// `Duration` rules out negative delays; the remaining rule is a non-zero idle
    /// timeout, without which deferred rendering would be synchronous.
    pub fn validate(&self) -> Result<(), VisibilityError> {
        if self.idle_timeout.is_zero() {
            return Err(VisibilityError::invalid("idle_timeout", 0));
        }
        Ok(())
    }

    /// Returns the exit policy for the current delays.
    #[inline]
    pub fn exit_policy(&self) -> ExitPolicy {
        ExitPolicy {
            enter: self.enter_delay,
            exit: self.exit_delay,
        }
    }

    /// Returns the fallback timer delay for deferred rendering.
    #[inline]
    pub fn idle_fallback_delay(&self) -> Duration {
        self.idle_fallback.delay(self.idle_timeout)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `enter_delay = Immediate`
    /// - `exit_delay = 0s`
    /// - `idle_timeout = 100ms`
    /// - `idle_fallback = Delay(1ms)`
    /// - `bus_capacity = 64`
    fn default() -> Self {
        Self {
            enter_delay: EnterDelay::Immediate,
            exit_delay: Duration::ZERO,
            idle_timeout: Self::DEFAULT_IDLE_TIMEOUT,
            idle_fallback: IdleFallback::default(),
            bus_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.enter_delay, EnterDelay::Immediate);
        assert_eq!(cfg.exit_delay, Duration::ZERO);
        assert_eq!(cfg.idle_timeout, Duration::from_millis(100));
        assert_eq!(cfg.idle_fallback_delay(), Duration::from_millis(1));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_from_millis_rejects_negative_exit() {
        let err = Config::from_millis(0, -1).unwrap_err();
        assert_eq!(err.as_label(), "invalid_configuration");
        assert_eq!(
            err,
            VisibilityError::InvalidConfiguration {
                field: "exit_delay",
                value: -1
            }
        );
    }

    #[test]
    fn test_from_millis_rejects_bad_enter() {
        assert!(Config::from_millis(-3, 0).is_err());
    }

    #[test]
    fn test_zero_idle_timeout_invalid() {
        let cfg = Config::default().with_idle_timeout(Duration::ZERO);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
