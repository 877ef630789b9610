//! Scheduling capability injected into visibility controllers.
//!
//! A controller never sleeps and never spawns work on its own. Every deferred effect
//! goes through a [`Scheduler`], which hands back an owned [`TimerHandle`] that the
//! controller keeps in its single timer slot.
//!
//! ## Contents
//! - [`Scheduler`]       the trait: clock, delayed jobs, idle jobs with a ceiling
//! - [`TimerHandle`]     owned cancellable handle (cancels on drop)
//! - [`TokioScheduler`]  production implementation on a tokio runtime
//! - [`ManualScheduler`] deterministic virtual clock for tests and simulations
//!
//! ## Wiring
//! ```text
//! VisibilityController ──schedule_after(d, job)──► Scheduler ──► TimerHandle (slot)
//!                      ──schedule_idle(t, job) ──►           ──► TimerHandle (slot)
//!
//! new transition / drop ──► slot.take() ──► TimerHandle::drop ──► token.cancel()
//! ```

mod handle;
mod manual;
mod runtime;
mod scheduler;

pub use handle::TimerHandle;
pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;
pub use scheduler::{Job, Scheduler};
