//! # Scheduler trait.
//!
//! Provides [`Scheduler`], the seam between a controller's timing logic and whatever
//! actually runs deferred work (a tokio runtime, a UI event loop, a virtual test clock).
//!
//! ## Contract
//! - `schedule_*` **never** runs the job synchronously; the job runs later, at most once.
//! - The job must not run once the returned [`TimerHandle`] is cancelled or dropped.
//! - `now()` is monotonic and shares its time base with the scheduled delays.
//!
//! ## Idle scheduling
//! The idle class means "run soon, at a low-priority opportunity, but no later than
//! `timeout`". Schedulers without such a class keep the default `supports_idle() == false`;
//! controllers then use their configured [`IdleFallback`](crate::IdleFallback) and never
//! call [`Scheduler::schedule_idle`].
//!
//! ## Example
//! ```rust
//! use std::time::{Duration, Instant};
//! use delayvisor::{Job, Scheduler, TimerHandle};
//! use tokio_util::sync::CancellationToken;
//!
//! /// Scheduler that drops every job (useful when only synchronous paths matter).
//! struct Discarding;
//!
//! impl Scheduler for Discarding {
//!     fn now(&self) -> Instant { Instant::now() }
//!
//!     fn schedule_after(&self, _delay: Duration, _job: Job) -> TimerHandle {
//!         TimerHandle::new(CancellationToken::new())
//!     }
//!
//!     fn name(&self) -> &'static str { "discarding" }
//! }
//! ```

use std::time::{Duration, Instant};

use super::handle::TimerHandle;

/// Deferred unit of work handed to a scheduler.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Timing capability used by visibility controllers.
pub trait Scheduler: Send + Sync + 'static {
    /// Current time in the scheduler's time base.
    fn now(&self) -> Instant;

    /// Runs `job` once after `delay`, unless the returned handle is cancelled first.
    fn schedule_after(&self, delay: Duration, job: Job) -> TimerHandle;

    /// Whether [`Scheduler::schedule_idle`] is backed by a real idle class.
    fn supports_idle(&self) -> bool {
        false
    }

    /// Runs `job` once at the next idle opportunity, no later than `timeout`.
    ///
    /// The default falls back to a plain timer at the ceiling.
    fn schedule_idle(&self, timeout: Duration, job: Job) -> TimerHandle {
        self.schedule_after(timeout, job)
    }

    /// Returns the scheduler name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
