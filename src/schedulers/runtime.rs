//! # Tokio-backed scheduler.
//!
//! [`TokioScheduler`] spawns one lightweight task per scheduled job on a tokio runtime.
//! Each task races the job's deadline against the handle's cancellation token:
//!
//! ```text
//! spawn ─► select! {
//!            biased;
//!            token.cancelled()       ─► exit, job dropped
//!            sleep(delay) / idle     ─► job()
//!          }
//! ```
//!
//! tokio exposes no idle hook. The idle class is approximated by yielding once to every
//! task that is already runnable, bounded by the timeout. Use
//! [`TokioScheduler::without_idle`] to make controllers use their fallback timer instead.
//!
//! Time is read from `tokio::time::Instant`, so paused test clocks
//! (`#[tokio::test(start_paused = true)]`) drive both `now()` and the delays.

use std::time::{Duration, Instant};

use tokio::{runtime::Handle, select, task, time};
use tokio_util::sync::CancellationToken;

use super::handle::TimerHandle;
use super::scheduler::{Job, Scheduler};
use crate::error::VisibilityError;

/// Scheduler running jobs as tasks on a tokio runtime.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
    idle: bool,
}

impl TokioScheduler {
    /// Creates a scheduler bound to the given runtime handle.
    pub fn new(handle: Handle) -> Self {
        Self { handle, idle: true }
    }

    /// Creates a scheduler bound to the runtime of the calling context.
    ///
    /// Fails with [`VisibilityError::RuntimeUnavailable`] outside a tokio runtime.
    pub fn current() -> Result<Self, VisibilityError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| VisibilityError::RuntimeUnavailable {
                component: "TokioScheduler",
            })
    }

    /// Reports idle scheduling as unavailable.
    #[must_use]
    pub fn without_idle(mut self) -> Self {
        self.idle = false;
        self
    }

    fn spawn_gated<F>(&self, deadline: F, job: Job) -> TimerHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let gate = token.clone();

        self.handle.spawn(async move {
            select! {
                biased;
                _ = gate.cancelled() => {}
                _ = deadline => {
                    if !gate.is_cancelled() {
                        job();
                    }
                }
            }
        });

        TimerHandle::new(token)
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        time::Instant::now().into_std()
    }

    fn schedule_after(&self, delay: Duration, job: Job) -> TimerHandle {
        self.spawn_gated(time::sleep(delay), job)
    }

    fn supports_idle(&self) -> bool {
        self.idle
    }

    fn schedule_idle(&self, timeout: Duration, job: Job) -> TimerHandle {
        let idle = async move {
            let _ = time::timeout(timeout, task::yield_now()).await;
        };
        self.spawn_gated(idle, job)
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_job(counter: &Arc<AtomicUsize>) -> Job {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_current_outside_runtime_fails() {
        let err = TokioScheduler::current().unwrap_err();
        assert_eq!(err.as_label(), "runtime_unavailable");
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_after_delay() {
        let sched = TokioScheduler::current().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let _handle = sched.schedule_after(Duration::from_millis(200), counter_job(&hits));

        time::sleep(Duration::from_millis(199)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_cancels_job() {
        let sched = TokioScheduler::current().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = sched.schedule_after(Duration::from_millis(50), counter_job(&hits));
        drop(handle);

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_job_runs_before_timeout() {
        let sched = TokioScheduler::current().unwrap();
        assert!(sched.supports_idle());
        let hits = Arc::new(AtomicUsize::new(0));
        let _handle = sched.schedule_idle(Duration::from_millis(100), counter_job(&hits));

        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_without_idle() {
        let sched = TokioScheduler::current().unwrap().without_idle();
        assert!(!sched.supports_idle());
        assert_eq!(sched.name(), "tokio");
    }
}
