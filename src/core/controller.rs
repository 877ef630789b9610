//! # VisibilityController: delayed mount/render state machine.
//!
//! Turns a stream of `active` changes into two outputs, `mounted` and `rendered`, and a
//! discard callback. One timer slot carries the only deferred effect.
//!
//! ## Transitions
//! ```text
//! set_active(true)                          set_active(false)
//!   ├─► cancel slot, epoch += 1               ├─► cancel slot, epoch += 1
//!   ├─► mount_started = now                   ├─► rendered = false
//!   ├─► mounted = true                        ├─► delay = ExitPolicy::effective_delay(elapsed)
//!   └─► enter_delay:                          └─► delay == 0 ─► mounted = false, discard()
//!         Immediate ─► rendered = true            delay  > 0 ─► slot = Exit timer
//!         After(d)  ─► slot = Enter timer
//!         Defer     ─► slot = Idle job (or fallback timer)
//!
//! timer fires (epoch unchanged):
//!   Enter / Idle ─► rendered = true
//!   Exit         ─► mounted = false, discard() if ever shown
//! ```
//!
//! ## Rules
//! - A repeated value is a no-op: no cancellation, no timer, no events.
//! - The discard callback runs after the state lock is released, so it may call back
//!   into the controller.
//! - Jobs hold a `Weak` reference; a dropped controller is never revived by its timer.
//! - Dropping the controller cancels the pending timer.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use delayvisor::{Config, ManualScheduler, Visibility, VisibilityController};
//!
//! let sched = ManualScheduler::new();
//! let cfg = Config::from_millis(300, 200)?;
//! let ctl = VisibilityController::new(cfg, Arc::new(sched.clone()), false)?;
//!
//! ctl.set_active(true);
//! assert_eq!(ctl.snapshot(), Visibility::ENTERING);
//!
//! sched.advance(Duration::from_millis(300));
//! assert_eq!(ctl.snapshot(), Visibility::SHOWN);
//!
//! ctl.set_active(false);
//! assert_eq!(ctl.snapshot(), Visibility { mounted: true, rendered: false });
//!
//! sched.advance(Duration::from_millis(200));
//! assert_eq!(ctl.snapshot(), Visibility::HIDDEN);
//! # Ok::<(), delayvisor::VisibilityError>(())
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::VisibilityError;
use crate::events::{Bus, Event, EventKind, TimerKind};
use crate::policies::EnterDelay;
use crate::schedulers::{Job, Scheduler};

use super::builder::ControllerBuilder;
use super::state::{PendingTimer, State, Visibility};

/// Callback invoked when content is unmounted after having been shown.
pub type DiscardFn = Arc<dyn Fn() + Send + Sync + 'static>;

/// Which scheduler class a timer uses.
#[derive(Clone, Copy)]
enum Slot {
    Timer,
    Idle,
}

/// State and collaborators shared between the controller and its scheduled jobs.
struct Shared {
    state: Mutex<State>,
    scheduler: Arc<dyn Scheduler>,
    bus: Bus,
    outputs: watch::Sender<Visibility>,
    name: Option<Arc<str>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind).with_controller_opt(self.name.as_ref())
    }

    fn set_mounted(&self, st: &mut State, mounted: bool, timer: Option<TimerKind>) {
        if st.visibility.mounted == mounted {
            return;
        }
        st.visibility.mounted = mounted;
        self.outputs.send_replace(st.visibility);

        let kind = if mounted {
            EventKind::Mounted
        } else {
            EventKind::Unmounted
        };
        let mut ev = self.event(kind);
        ev.timer = timer;
        self.bus.publish(ev);
    }

    fn set_rendered(&self, st: &mut State, rendered: bool, timer: Option<TimerKind>) {
        if st.visibility.rendered == rendered {
            return;
        }
        st.visibility.rendered = rendered;
        self.outputs.send_replace(st.visibility);

        let kind = if rendered {
            EventKind::Rendered
        } else {
            EventKind::RenderRevoked
        };
        let mut ev = self.event(kind);
        ev.timer = timer;
        self.bus.publish(ev);
    }

    /// Empties the timer slot. Returns `true` if a live timer was cancelled.
    fn cancel_timer(&self, st: &mut State) -> bool {
        let Some(pending) = st.timer.take() else {
            return false;
        };
        pending.handle.cancel();
        self.bus
            .publish(self.event(EventKind::TimerCancelled).with_timer(pending.kind));
        true
    }

    /// Unmounts and hands back the discard callback if content was ever shown.
    fn unmount(&self, st: &mut State, timer: Option<TimerKind>) -> Option<DiscardFn> {
        self.set_mounted(st, false, timer);
        if !st.ever_mounted() {
            return None;
        }
        self.bus.publish(self.event(EventKind::Discarded));
        st.on_discard.clone()
    }

    /// Applies a transition of the active signal. The caller releases the lock before
    /// invoking the returned callback.
    fn apply(self: &Arc<Self>, st: &mut State, active: bool) -> Option<DiscardFn> {
        st.active = active;
        st.next_epoch();
        self.cancel_timer(st);
        let now = self.scheduler.now();

        if active {
            st.mount_started = Some(now);
            self.bus.publish(self.event(EventKind::ShowRequested));
            self.set_mounted(st, true, None);

            match st.config.enter_delay {
                EnterDelay::Defer => {
                    if self.scheduler.supports_idle() {
                        let timeout = st.config.idle_timeout;
                        self.arm(st, TimerKind::Idle, timeout, Slot::Idle);
                    } else {
                        let delay = st.config.idle_fallback_delay();
                        self.arm(st, TimerKind::Idle, delay, Slot::Timer);
                    }
                }
                EnterDelay::After(d) if !d.is_zero() => {
                    self.arm(st, TimerKind::Enter, d, Slot::Timer);
                }
                EnterDelay::Immediate | EnterDelay::After(_) => {
                    self.set_rendered(st, true, None);
                }
            }
            return None;
        }

        let elapsed = st
            .mount_started
            .map(|started| now.saturating_duration_since(started));
        let delay = st.config.exit_policy().effective_delay(elapsed);

        let mut ev = self.event(EventKind::HideRequested).with_delay(delay);
        if let Some(elapsed) = elapsed {
            ev = ev.with_elapsed(elapsed);
        }
        self.bus.publish(ev);

        self.set_rendered(st, false, None);
        if !st.visibility.mounted {
            // Never shown: there is nothing to take out of the tree.
            return None;
        }
        if delay.is_zero() {
            return self.unmount(st, None);
        }
        self.arm(st, TimerKind::Exit, delay, Slot::Timer);
        None
    }

    /// Fills the (already emptied) timer slot with a job bound to the current epoch.
    fn arm(self: &Arc<Self>, st: &mut State, kind: TimerKind, delay: Duration, slot: Slot) {
        let weak: Weak<Shared> = Arc::downgrade(self);
        let epoch = st.epoch;
        let job: Job = Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.fire(epoch, kind);
            }
        });

        let handle = match slot {
            Slot::Timer => self.scheduler.schedule_after(delay, job),
            Slot::Idle => self.scheduler.schedule_idle(delay, job),
        };
        st.timer = Some(PendingTimer { kind, handle });
        self.bus.publish(
            self.event(EventKind::TimerScheduled)
                .with_timer(kind)
                .with_delay(delay),
        );
    }

    /// Timer callback: applies the deferred effect unless a newer transition superseded it.
    fn fire(&self, epoch: u64, kind: TimerKind) {
        let discard = {
            let mut st = self.lock();
            if st.epoch != epoch {
                return;
            }
            let Some(pending) = st.timer.take() else {
                return;
            };
            drop(pending);
            self.bus
                .publish(self.event(EventKind::TimerFired).with_timer(kind));

            match kind {
                TimerKind::Enter | TimerKind::Idle => {
                    self.set_rendered(&mut st, true, Some(kind));
                    None
                }
                TimerKind::Exit => self.unmount(&mut st, Some(kind)),
            }
        };

        if let Some(callback) = discard {
            callback();
        }
    }
}

/// Delayed visibility controller.
///
/// Owns exactly one visibility lifecycle. Created through
/// [`VisibilityController::new`] or [`VisibilityController::builder`]; evaluated once
/// at creation with the initial signal value.
///
/// ### Threading
/// `set_active` is expected from a single logical owner. Timer jobs may fire on another
/// thread (for example a tokio worker); state is guarded by a mutex so both sides stay
/// consistent.
pub struct VisibilityController {
    shared: Arc<Shared>,
    listener: Option<CancellationToken>,
}

impl VisibilityController {
    /// Creates a controller using `scheduler` and evaluates `initial_active`.
    ///
    /// Fails with [`VisibilityError::InvalidConfiguration`] if `config` does not validate.
    pub fn new(
        config: Config,
        scheduler: Arc<dyn Scheduler>,
        initial_active: bool,
    ) -> Result<Self, VisibilityError> {
        Self::builder(config)
            .with_scheduler(scheduler)
            .build(initial_active)
    }

    /// Starts a builder for the given configuration.
    pub fn builder(config: Config) -> ControllerBuilder {
        ControllerBuilder::new(config)
    }

    /// Wires a controller from validated parts. Used by the builder.
    pub(super) fn assemble(
        config: Config,
        scheduler: Arc<dyn Scheduler>,
        bus: Bus,
        name: Option<Arc<str>>,
        on_discard: Option<DiscardFn>,
        listener: Option<CancellationToken>,
        initial_active: bool,
    ) -> Self {
        let (outputs, _rx) = watch::channel(Visibility::HIDDEN);
        let shared = Arc::new(Shared {
            state: Mutex::new(State::new(config, on_discard)),
            scheduler,
            bus,
            outputs,
            name,
        });

        let discard = {
            let mut st = shared.lock();
            shared.apply(&mut st, initial_active)
        };
        if let Some(callback) = discard {
            callback();
        }

        Self { shared, listener }
    }

    /// Feeds a new value of the active signal.
    ///
    /// Returns `false` (and does nothing) when `active` equals the current value.
    pub fn set_active(&self, active: bool) -> bool {
        let discard = {
            let mut st = self.shared.lock();
            if st.active == active {
                return false;
            }
            self.shared.apply(&mut st, active)
        };

        if let Some(callback) = discard {
            callback();
        }
        true
    }

    /// Latest value of the active signal.
    pub fn is_active(&self) -> bool {
        self.shared.lock().active
    }

    /// Whether content should currently be in the render tree.
    pub fn mounted(&self) -> bool {
        self.shared.lock().visibility.mounted
    }

    /// Whether content should currently be treated as fully transitioned in.
    pub fn rendered(&self) -> bool {
        self.shared.lock().visibility.rendered
    }

    /// Both outputs, read under one lock.
    pub fn snapshot(&self) -> Visibility {
        self.shared.lock().visibility
    }

    /// Receiver that observes every change of the outputs.
    pub fn watch(&self) -> watch::Receiver<Visibility> {
        self.shared.outputs.subscribe()
    }

    /// Receiver for lifecycle events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.shared.bus.subscribe()
    }

    /// Controller name attached to events, if any.
    pub fn name(&self) -> Option<&str> {
        self.shared.name.as_deref()
    }

    /// Whether a deferred effect is pending.
    pub fn has_pending_timer(&self) -> bool {
        self.shared.lock().timer.is_some()
    }

    /// Kind of the pending deferred effect, if any.
    pub fn pending_timer(&self) -> Option<TimerKind> {
        self.shared.lock().timer.as_ref().map(|p| p.kind)
    }

    /// Current configuration.
    pub fn config(&self) -> Config {
        self.shared.lock().config.clone()
    }

    /// Replaces the configuration; it takes effect on the next transition.
    ///
    /// A pending timer keeps the delay it was scheduled with. `bus_capacity` is fixed at
    /// construction and ignored here.
    pub fn set_config(&self, config: Config) -> Result<(), VisibilityError> {
        config.validate()?;
        self.shared.lock().config = config;
        Ok(())
    }

    /// Replaces the discard callback.
    pub fn set_on_discard<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.shared.lock().on_discard = Some(Arc::new(callback));
    }

    /// Removes the discard callback.
    pub fn clear_on_discard(&self) {
        self.shared.lock().on_discard = None;
    }

    /// Releases the timer slot without applying its effect.
    ///
    /// Outputs keep their current values until the next transition. Returns `true` if a
    /// timer was pending.
    pub fn cancel_pending(&self) -> bool {
        let mut st = self.shared.lock();
        st.next_epoch();
        self.shared.cancel_timer(&mut st)
    }
}

impl Drop for VisibilityController {
    fn drop(&mut self) {
        self.cancel_pending();
        if let Some(listener) = self.listener.take() {
            listener.cancel();
        }
    }
}

impl std::fmt::Debug for VisibilityController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.shared.lock();
        f.debug_struct("VisibilityController")
            .field("name", &self.shared.name)
            .field("active", &st.active)
            .field("visibility", &st.visibility)
            .field("pending", &st.timer.as_ref().map(|p| p.kind))
            .field("scheduler", &self.shared.scheduler.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::IdleFallback;
    use crate::schedulers::ManualScheduler;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    struct Harness {
        sched: ManualScheduler,
        ctl: VisibilityController,
        discards: Arc<AtomicUsize>,
    }

    impl Harness {
        fn new(enter: i64, exit: i64) -> Self {
            Self::with_config(Config::from_millis(enter, exit).unwrap(), ManualScheduler::new())
        }

        fn with_config(cfg: Config, sched: ManualScheduler) -> Self {
            let discards = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&discards);
            let ctl = VisibilityController::builder(cfg)
                .with_scheduler(Arc::new(sched.clone()))
                .on_discard(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .build(false)
                .unwrap();
            Self {
                sched,
                ctl,
                discards,
            }
        }

        fn discards(&self) -> usize {
            self.discards.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_zero_delays_scenario() {
        let h = Harness::new(0, 0);
        assert_eq!(h.ctl.snapshot(), Visibility::HIDDEN);

        assert!(h.ctl.set_active(true));
        assert_eq!(h.ctl.snapshot(), Visibility::SHOWN);
        assert!(!h.ctl.has_pending_timer());

        assert!(h.ctl.set_active(false));
        assert_eq!(h.ctl.snapshot(), Visibility::HIDDEN);
        assert_eq!(h.discards(), 1);
        assert_eq!(h.sched.pending(), 0);
    }

    #[test]
    fn test_enter_delay_renders_exactly_at_deadline() {
        let h = Harness::new(200, 0);
        h.ctl.set_active(true);
        assert_eq!(h.ctl.snapshot(), Visibility::ENTERING);
        assert_eq!(h.ctl.pending_timer(), Some(TimerKind::Enter));

        h.sched.advance(ms(199));
        assert!(!h.ctl.rendered());

        h.sched.advance(ms(1));
        assert_eq!(h.ctl.snapshot(), Visibility::SHOWN);
        assert!(!h.ctl.has_pending_timer());
    }

    #[test]
    fn test_hide_revokes_render_synchronously() {
        let h = Harness::new(0, 500);
        h.ctl.set_active(true);
        h.sched.advance(ms(1000));

        h.ctl.set_active(false);
        assert!(!h.ctl.rendered());
        assert!(h.ctl.mounted());
        assert_eq!(h.ctl.pending_timer(), Some(TimerKind::Exit));

        h.sched.advance(ms(500));
        assert_eq!(h.ctl.snapshot(), Visibility::HIDDEN);
        assert_eq!(h.discards(), 1);
    }

    #[test]
    fn test_fast_toggle_unmounts_immediately() {
        let h = Harness::new(500, 1000);
        h.ctl.set_active(true);
        h.sched.advance(ms(100));

        h.ctl.set_active(false);
        assert_eq!(h.ctl.snapshot(), Visibility::HIDDEN);
        assert!(!h.ctl.has_pending_timer());
        assert_eq!(h.discards(), 1);

        // The superseded enter timer must never fire.
        h.sched.advance(ms(1000));
        assert_eq!(h.ctl.snapshot(), Visibility::HIDDEN);
    }

    #[test]
    fn test_bounded_flash() {
        let h = Harness::new(0, 1000);
        h.ctl.set_active(true);
        h.sched.advance(ms(50));

        h.ctl.set_active(false);
        assert!(h.ctl.mounted());
        assert_eq!(h.sched.next_deadline(), Some(ms(50)));

        h.sched.advance(ms(49));
        assert!(h.ctl.mounted());
        h.sched.advance(ms(1));
        assert!(!h.ctl.mounted());
        assert_eq!(h.discards(), 1);
    }

    #[test]
    fn test_discard_never_fires_without_show() {
        let h = Harness::new(0, 300);
        assert!(!h.ctl.set_active(false));
        h.sched.advance(ms(1000));
        assert_eq!(h.discards(), 0);
        assert_eq!(h.sched.pending(), 0);
    }

    #[test]
    fn test_discard_once_per_completed_hide() {
        let h = Harness::new(0, 100);
        for _ in 0..3 {
            h.ctl.set_active(true);
            h.sched.advance(ms(500));
            h.ctl.set_active(false);
            h.sched.advance(ms(500));
        }
        assert_eq!(h.discards(), 3);
    }

    #[test]
    fn test_reshow_during_exit_cancels_unmount() {
        let h = Harness::new(0, 300);
        h.ctl.set_active(true);
        h.sched.advance(ms(1000));
        h.ctl.set_active(false);
        h.sched.advance(ms(100));

        h.ctl.set_active(true);
        assert_eq!(h.ctl.snapshot(), Visibility::SHOWN);
        h.sched.advance(ms(1000));
        assert_eq!(h.ctl.snapshot(), Visibility::SHOWN);
        assert_eq!(h.discards(), 0);
    }

    #[test]
    fn test_repeated_value_is_noop() {
        let h = Harness::new(300, 0);
        assert!(h.ctl.set_active(true));
        let mut events = h.ctl.events();

        assert!(!h.ctl.set_active(true));
        assert_eq!(h.sched.pending(), 1);
        assert!(events.try_recv().is_err());

        h.sched.advance(ms(300));
        assert!(h.ctl.rendered());
    }

    #[test]
    fn test_at_most_one_timer() {
        let h = Harness::new(300, 300);
        for i in 0..10 {
            h.ctl.set_active(i % 2 == 0);
            h.sched.advance(ms(350));
            assert!(h.sched.pending() <= 1);
        }
    }

    #[test]
    fn test_deferred_enter_uses_idle_class() {
        let h = Harness::new(-1, 0);
        h.ctl.set_active(true);
        assert_eq!(h.ctl.snapshot(), Visibility::ENTERING);
        assert_eq!(h.ctl.pending_timer(), Some(TimerKind::Idle));

        assert_eq!(h.sched.run_idle(), 1);
        assert_eq!(h.ctl.snapshot(), Visibility::SHOWN);
    }

    #[test]
    fn test_deferred_enter_bounded_by_idle_timeout() {
        let h = Harness::new(-1, 0);
        h.ctl.set_active(true);
        h.sched.advance(ms(99));
        assert!(!h.ctl.rendered());
        h.sched.advance(ms(1));
        assert!(h.ctl.rendered());
    }

    #[test]
    fn test_deferred_enter_fallback_next_tick() {
        let h = Harness::with_config(
            Config::from_millis(-1, 0).unwrap(),
            ManualScheduler::without_idle(),
        );
        h.ctl.set_active(true);
        assert_eq!(h.sched.run_idle(), 0);
        assert!(!h.ctl.rendered());

        h.sched.advance(ms(1));
        assert!(h.ctl.rendered());
    }

    #[test]
    fn test_deferred_enter_fallback_ceiling() {
        let cfg = Config::from_millis(-1, 0)
            .unwrap()
            .with_idle_fallback(IdleFallback::Ceiling)
            .with_idle_timeout(ms(80));
        let h = Harness::with_config(cfg, ManualScheduler::without_idle());
        h.ctl.set_active(true);

        h.sched.advance(ms(79));
        assert!(!h.ctl.rendered());
        h.sched.advance(ms(1));
        assert!(h.ctl.rendered());
    }

    #[test]
    fn test_deferred_hide_is_not_short_circuited() {
        let h = Harness::new(-1, 200);
        h.ctl.set_active(true);
        h.sched.advance(ms(10));
        h.ctl.set_active(false);

        assert!(h.ctl.mounted());
        assert_eq!(h.sched.next_deadline(), Some(ms(10)));
        h.sched.advance(ms(10));
        assert!(!h.ctl.mounted());
    }

    #[test]
    fn test_initial_active_true() {
        let sched = ManualScheduler::new();
        let ctl =
            VisibilityController::new(Config::default(), Arc::new(sched.clone()), true).unwrap();
        assert!(ctl.is_active());
        assert_eq!(ctl.snapshot(), Visibility::SHOWN);
        assert!(!ctl.set_active(true));
    }

    #[test]
    fn test_drop_cancels_pending_timer() {
        let h = Harness::new(0, 500);
        h.ctl.set_active(true);
        h.sched.advance(ms(1000));
        h.ctl.set_active(false);
        assert_eq!(h.sched.pending(), 1);

        let Harness {
            sched,
            ctl,
            discards,
        } = h;
        drop(ctl);
        assert_eq!(sched.pending(), 0);
        sched.advance(ms(1000));
        assert_eq!(discards.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_pending_keeps_outputs() {
        let h = Harness::new(400, 0);
        h.ctl.set_active(true);
        assert!(h.ctl.cancel_pending());
        assert!(!h.ctl.cancel_pending());

        h.sched.advance(ms(1000));
        assert_eq!(h.ctl.snapshot(), Visibility::ENTERING);
    }

    #[test]
    fn test_set_config_applies_on_next_transition() {
        let h = Harness::new(0, 0);
        h.ctl
            .set_config(Config::from_millis(250, 0).unwrap())
            .unwrap();
        h.ctl.set_active(true);
        assert_eq!(h.ctl.snapshot(), Visibility::ENTERING);
        h.sched.advance(ms(250));
        assert!(h.ctl.rendered());

        let bad = Config::default().with_idle_timeout(Duration::ZERO);
        assert!(h.ctl.set_config(bad).is_err());
        assert_eq!(h.ctl.config().enter_delay, EnterDelay::After(ms(250)));
    }

    #[test]
    fn test_discard_callback_may_reenter() {
        let sched = ManualScheduler::new();
        let ctl = Arc::new(
            VisibilityController::new(Config::default(), Arc::new(sched.clone()), false).unwrap(),
        );
        let seen = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&ctl);
        let slot = Arc::clone(&seen);
        ctl.set_on_discard(move || {
            if let Some(ctl) = weak.upgrade() {
                *slot.lock().unwrap() = Some(ctl.snapshot());
            }
        });

        ctl.set_active(true);
        ctl.set_active(false);
        assert_eq!(*seen.lock().unwrap(), Some(Visibility::HIDDEN));
    }

    #[test]
    fn test_clear_on_discard() {
        let h = Harness::new(0, 0);
        h.ctl.clear_on_discard();
        h.ctl.set_active(true);
        h.ctl.set_active(false);
        assert_eq!(h.discards(), 0);
    }

    #[test]
    fn test_watch_observes_changes() {
        let h = Harness::new(100, 0);
        let mut rx = h.ctl.watch();
        assert_eq!(*rx.borrow_and_update(), Visibility::HIDDEN);

        h.ctl.set_active(true);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Visibility::ENTERING);

        h.sched.advance(ms(100));
        assert_eq!(*rx.borrow_and_update(), Visibility::SHOWN);
    }

    #[test]
    fn test_event_sequence_for_delayed_show_and_hide() {
        let sched = ManualScheduler::new();
        let ctl = VisibilityController::builder(Config::from_millis(100, 100).unwrap())
            .with_scheduler(Arc::new(sched.clone()))
            .with_name("panel")
            .build(false)
            .unwrap();
        let mut rx = ctl.events();

        ctl.set_active(true);
        sched.advance(ms(200));
        ctl.set_active(false);
        sched.advance(ms(100));

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            assert_eq!(ev.controller.as_deref(), Some("panel"));
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::ShowRequested,
                EventKind::Mounted,
                EventKind::TimerScheduled,
                EventKind::TimerFired,
                EventKind::Rendered,
                EventKind::HideRequested,
                EventKind::RenderRevoked,
                EventKind::TimerScheduled,
                EventKind::TimerFired,
                EventKind::Unmounted,
                EventKind::Discarded,
            ]
        );
    }

    #[test]
    fn test_superseding_transition_reports_cancellation() {
        let h = Harness::new(300, 0);
        h.ctl.set_active(true);
        let mut rx = h.ctl.events();
        h.ctl.set_active(false);

        let first = rx.try_recv().unwrap();
        assert_eq!(first.kind, EventKind::TimerCancelled);
        assert_eq!(first.timer, Some(TimerKind::Enter));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_deferred_enter_within_ceiling() {
        let ctl = VisibilityController::builder(Config::from_millis(-1, 0).unwrap())
            .build(false)
            .unwrap();
        ctl.set_active(true);
        assert!(ctl.mounted());

        tokio::time::sleep(ms(100)).await;
        assert!(ctl.rendered());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_enter_delay() {
        let ctl = VisibilityController::builder(Config::from_millis(300, 0).unwrap())
            .build(false)
            .unwrap();
        ctl.set_active(true);

        tokio::time::sleep(ms(299)).await;
        assert!(!ctl.rendered());
        tokio::time::sleep(ms(2)).await;
        assert!(ctl.rendered());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_fast_toggle() {
        let ctl = VisibilityController::builder(Config::from_millis(500, 1000).unwrap())
            .build(false)
            .unwrap();
        ctl.set_active(true);
        tokio::time::sleep(ms(100)).await;
        ctl.set_active(false);
        assert!(!ctl.mounted());

        tokio::time::sleep(ms(1000)).await;
        assert_eq!(ctl.snapshot(), Visibility::HIDDEN);
    }
}
