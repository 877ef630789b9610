//! # Deterministic scheduler with a virtual clock.
//!
//! [`ManualScheduler`] never runs anything on its own. Time moves only when the owner
//! calls [`ManualScheduler::advance`], and idle jobs run only on
//! [`ManualScheduler::run_idle`] (or once their ceiling is reached by `advance`).
//!
//! ```text
//! schedule_after(d) ─► timers[(now + d, seq)] = job
//! schedule_idle(t)  ─► timers[(now + t, seq)] = job (idle)
//!
//! advance(by):
//!   loop {
//!     pop earliest live timer with deadline <= now + by
//!     now = deadline ─► job()            (lock released while job runs)
//!   }
//!   now = now + by
//! ```
//!
//! Jobs run with the scheduler lock released, so a job may schedule further jobs; those
//! run in the same `advance` call if their deadline falls inside the window. Equal
//! deadlines run in scheduling order.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::Duration;
//! use delayvisor::{ManualScheduler, Scheduler};
//!
//! let sched = ManualScheduler::new();
//! let fired = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&fired);
//! let _handle = sched.schedule_after(
//!     Duration::from_millis(10),
//!     Box::new(move || flag.store(true, Ordering::SeqCst)),
//! );
//!
//! sched.advance(Duration::from_millis(9));
//! assert!(!fired.load(Ordering::SeqCst));
//! sched.advance(Duration::from_millis(1));
//! assert!(fired.load(Ordering::SeqCst));
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::handle::TimerHandle;
use super::scheduler::{Job, Scheduler};

/// A queued job.
struct Entry {
    token: CancellationToken,
    job: Job,
    idle: bool,
}

/// Virtual clock and timer queue.
struct ManualState {
    origin: Instant,
    offset: Duration,
    next_seq: u64,
    timers: BTreeMap<(Duration, u64), Entry>,
    idle: bool,
}

impl ManualState {
    fn purge_cancelled(&mut self) {
        self.timers.retain(|_, entry| !entry.token.is_cancelled());
    }

    /// Removes the earliest live entry whose deadline is at or before `limit`.
    fn pop_due(&mut self, limit: Duration) -> Option<(Duration, Entry)> {
        self.purge_cancelled();
        let key = *self.timers.keys().next()?;
        if key.0 > limit {
            return None;
        }
        self.timers.remove(&key).map(|entry| (key.0, entry))
    }
}

/// Scheduler driven explicitly by its owner.
///
/// Cloning yields another handle to the same clock and queue.
#[derive(Clone)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero, with idle scheduling supported.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                origin: Instant::now(),
                offset: Duration::ZERO,
                next_seq: 0,
                timers: BTreeMap::new(),
                idle: true,
            })),
        }
    }

    /// Creates a scheduler that reports idle scheduling as unavailable.
    pub fn without_idle() -> Self {
        let sched = Self::new();
        sched.lock().idle = false;
        sched
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enqueue(&self, delay: Duration, job: Job, idle: bool) -> TimerHandle {
        let token = CancellationToken::new();
        let mut st = self.lock();
        let seq = st.next_seq;
        st.next_seq += 1;
        let deadline = st.offset + delay;
        st.timers.insert(
            (deadline, seq),
            Entry {
                token: token.clone(),
                job,
                idle,
            },
        );
        TimerHandle::new(token)
    }

    /// Virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        self.lock().offset
    }

    /// Moves the clock forward by `by`, running every live job that falls due.
    ///
    /// Returns the number of jobs run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().offset + by;
        let mut ran = 0;

        loop {
            let due = {
                let mut st = self.lock();
                let due = st.pop_due(target);
                if let Some((deadline, _)) = &due {
                    st.offset = *deadline;
                }
                due
            };
            let Some((_, entry)) = due else { break };
            if !entry.token.is_cancelled() {
                (entry.job)();
                ran += 1;
            }
        }

        let mut st = self.lock();
        if st.offset < target {
            st.offset = target;
        }
        ran
    }

    /// Runs every live idle job now, without moving the clock.
    ///
    /// Returns the number of jobs run.
    pub fn run_idle(&self) -> usize {
        let entries: Vec<Entry> = {
            let mut st = self.lock();
            st.purge_cancelled();
            let keys: Vec<_> = st
                .timers
                .iter()
                .filter(|(_, entry)| entry.idle)
                .map(|(key, _)| *key)
                .collect();
            keys.into_iter()
                .filter_map(|key| st.timers.remove(&key))
                .collect()
        };

        let mut ran = 0;
        for entry in entries {
            if !entry.token.is_cancelled() {
                (entry.job)();
                ran += 1;
            }
        }
        ran
    }

    /// Number of live (not cancelled, not yet run) jobs.
    pub fn pending(&self) -> usize {
        let mut st = self.lock();
        st.purge_cancelled();
        st.timers.len()
    }

    /// Time until the earliest live job falls due.
    pub fn next_deadline(&self) -> Option<Duration> {
        let mut st = self.lock();
        st.purge_cancelled();
        let offset = st.offset;
        st.timers
            .keys()
            .next()
            .map(|(deadline, _)| deadline.saturating_sub(offset))
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        let st = self.lock();
        st.origin + st.offset
    }

    fn schedule_after(&self, delay: Duration, job: Job) -> TimerHandle {
        self.enqueue(delay, job, false)
    }

    fn supports_idle(&self) -> bool {
        self.lock().idle
    }

    fn schedule_idle(&self, timeout: Duration, job: Job) -> TimerHandle {
        self.enqueue(timeout, job, true)
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}
