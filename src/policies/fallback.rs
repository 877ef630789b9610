//! # Fallback for deferred rendering without an idle scheduler.
//!
//! Some hosts have no idle-callback facility. [`IdleFallback`] tells the controller what
//! to do with [`EnterDelay::Defer`](crate::EnterDelay::Defer) in that case:
//! - [`IdleFallback::Delay`] a plain timer with a small delay (default 1ms, "next tick");
//! - [`IdleFallback::Ceiling`] a plain timer at the idle timeout itself.

use std::time::Duration;

/// Timer used in place of idle scheduling when the scheduler does not support it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleFallback {
    /// Schedule after this delay.
    Delay(Duration),
    /// Schedule after the configured idle timeout.
    Ceiling,
}

impl IdleFallback {
    /// The default fallback delay.
    pub const NEXT_TICK: Duration = Duration::from_millis(1);

    /// Resolves the fallback timer delay for the given idle timeout.
    ///
    /// `Delay` never exceeds the idle timeout.
    #[inline]
    pub fn delay(&self, idle_timeout: Duration) -> Duration {
        match self {
            IdleFallback::Delay(d) => (*d).min(idle_timeout),
            IdleFallback::Ceiling => idle_timeout,
        }
    }
}

impl Default for IdleFallback {
    /// Returns `IdleFallback::Delay(1ms)`.
    fn default() -> Self {
        IdleFallback::Delay(Self::NEXT_TICK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_next_tick() {
        assert_eq!(
            IdleFallback::default().delay(Duration::from_millis(100)),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn test_delay_clamped_to_timeout() {
        let fb = IdleFallback::Delay(Duration::from_secs(5));
        assert_eq!(
            fb.delay(Duration::from_millis(100)),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_ceiling_uses_timeout() {
        assert_eq!(
            IdleFallback::Ceiling.delay(Duration::from_millis(80)),
            Duration::from_millis(80)
        );
    }
}
