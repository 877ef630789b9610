//! # Lifecycle events emitted by visibility controllers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Input events**: show/hide requests accepted by the controller
//! - **Output events**: changes of the `mounted` / `rendered` outputs and discard callbacks
//! - **Timer events**: the single timer slot being filled, cancelled or fired
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the controller
//! name, delays and elapsed mount time.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use delayvisor::{Event, EventKind, TimerKind};
//!
//! let ev = Event::new(EventKind::TimerScheduled)
//!     .with_controller("tooltip")
//!     .with_timer(TimerKind::Exit)
//!     .with_delay(Duration::from_millis(150));
//!
//! assert_eq!(ev.kind, EventKind::TimerScheduled);
//! assert_eq!(ev.controller.as_deref(), Some("tooltip"));
//! assert_eq!(ev.delay_ms, Some(150));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of controller events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Input events ===
    /// The active signal changed to `true`.
    ///
    /// Sets:
    /// - `controller`: controller name (if configured)
    /// - `at`, `seq`
    ShowRequested,

    /// The active signal changed to `false`.
    ///
    /// Sets:
    /// - `controller`: controller name (if configured)
    /// - `elapsed_ms`: time since the last show request (absent if never shown)
    /// - `delay_ms`: effective exit delay
    /// - `at`, `seq`
    HideRequested,

    // === Output events ===
    /// `mounted` became true.
    Mounted,

    /// `rendered` became true.
    ///
    /// Sets:
    /// - `timer`: the timer that fired (absent for synchronous rendering)
    Rendered,

    /// `rendered` became false because of a hide request.
    RenderRevoked,

    /// `mounted` became false.
    ///
    /// Sets:
    /// - `timer`: `Exit` when the unmount was delayed
    Unmounted,

    /// The discard callback was invoked (or would have been, if none is set).
    Discarded,

    // === Timer events ===
    /// A timer was placed in the controller's slot.
    ///
    /// Sets:
    /// - `timer`: timer kind
    /// - `delay_ms`: scheduled delay (idle timers carry the idle timeout)
    TimerScheduled,

    /// A pending timer was cancelled before firing.
    ///
    /// Sets:
    /// - `timer`: timer kind
    TimerCancelled,

    /// A pending timer fired and its effect was applied.
    ///
    /// Sets:
    /// - `timer`: timer kind
    TimerFired,

    // === Subscriber events ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `controller`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `controller`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,
}

/// What a scheduled timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fixed enter delay: sets `rendered = true`.
    Enter,
    /// Deferred enter (idle class or its fallback timer): sets `rendered = true`.
    Idle,
    /// Exit delay: sets `mounted = false` and invokes the discard callback.
    Exit,
}

impl TimerKind {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TimerKind::Enter => "enter",
            TimerKind::Idle => "idle",
            TimerKind::Exit => "exit",
        }
    }
}

/// Controller event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the controller (or subscriber, for subscriber events).
    pub controller: Option<Arc<str>>,
    /// Timer the event refers to.
    pub timer: Option<TimerKind>,
    /// Delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Time since the last show request in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Human-readable reason (overflow details, panic info).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            controller: None,
            timer: None,
            delay_ms: None,
            elapsed_ms: None,
            reason: None,
        }
    }

    /// Attaches a controller name.
    #[inline]
    pub fn with_controller(mut self, name: impl Into<Arc<str>>) -> Self {
        self.controller = Some(name.into());
        self
    }

    /// Attaches an optional controller name.
    #[inline]
    pub(crate) fn with_controller_opt(mut self, name: Option<&Arc<str>>) -> Self {
        self.controller = name.cloned();
        self
    }

    /// Attaches a timer kind.
    #[inline]
    pub fn with_timer(mut self, timer: TimerKind) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(compact_ms(d));
        self
    }

    /// Attaches the elapsed mount time (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        self.elapsed_ms = Some(compact_ms(d));
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_controller(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_controller(subscriber)
            .with_reason(info)
    }

    /// True for events describing a change of `mounted` or `rendered`.
    #[inline]
    pub fn is_output_change(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Mounted
                | EventKind::Rendered
                | EventKind::RenderRevoked
                | EventKind::Unmounted
        )
    }
}

#[inline]
fn compact_ms(d: Duration) -> u32 {
    d.as_millis().min(u128::from(u32::MAX)) as u32
}
