//! # delayvisor
//!
//! **delayvisor** decouples a "should be visible" signal from the moments content enters
//! and leaves a render tree, so that rapid toggling does not cause flicker or wasted
//! mount/unmount churn.
//!
//! A [`VisibilityController`] consumes boolean `active` changes and produces two outputs:
//! - `mounted`: content should exist in the render tree;
//! - `rendered`: content is fully transitioned in (eligible for "visible" styling).
//!
//! It also invokes a discard callback exactly once per completed hide cycle that had
//! actually reached mount.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!       set_active(bool)
//!              │
//!              ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  VisibilityController                                             │
//! │  - State (active, mounted, rendered, mount_started, epoch)        │
//! │  - single timer slot: Option<TimerHandle>                         │
//! │  - Config (enter_delay, exit_delay, idle_timeout, idle_fallback)  │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        │ schedule_after / │ watch::Sender    │ publish(Event)
//!        │ schedule_idle    │ <Visibility>     │
//!        ▼                  ▼                  ▼
//!  ┌────────────┐    ┌─────────────┐   ┌──────────────┐
//!  │ Scheduler  │    │ host / UI   │   │ Bus          │──► SubscriberSet
//!  │ tokio or   │    │ re-renders  │   │ (broadcast)  │      ├─► LogWriter
//!  │ manual     │    └─────────────┘   └──────────────┘      └─► custom
//!  └─────┬──────┘
//!        │ job(epoch) when due
//!        ▼
//!   rendered = true  /  mounted = false + discard()
//! ```
//!
//! ### Lifecycle
//! ```text
//! show:  mounted = true ──(enter delay)──► rendered = true
//! hide:  rendered = false ──(effective exit delay)──► mounted = false ─► discard()
//!
//! every transition:
//!   ├─► cancel the pending timer (at most one exists)
//!   ├─► epoch += 1 (a late job from an older epoch does nothing)
//!   └─► maybe schedule one new timer
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                         |
//! |-------------------|--------------------------------------------------------------|--------------------------------------------|
//! | **Controller**    | Delayed mount/render state machine with one timer slot.      | [`VisibilityController`], [`Visibility`]   |
//! | **Policies**      | Enter delay, exit shortcut, idle fallback.                   | [`EnterDelay`], [`ExitPolicy`], [`IdleFallback`] |
//! | **Scheduling**    | Injected timing capability, tokio and deterministic clocks.  | [`Scheduler`], [`TokioScheduler`], [`ManualScheduler`] |
//! | **Events**        | Lifecycle events over a broadcast bus.                       | [`Event`], [`EventKind`], [`Subscribe`]    |
//! | **Errors**        | Typed configuration errors.                                  | [`VisibilityError`]                        |
//! | **Configuration** | Millisecond constructor with the `-1` deferred sentinel.     | [`Config`]                                 |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use delayvisor::{Config, VisibilityController};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Render 150ms after showing; linger up to 200ms after hiding.
//!     let cfg = Config::from_millis(150, 200)?;
//!
//!     let tooltip = VisibilityController::builder(cfg)
//!         .with_name("tooltip")
//!         .on_discard(|| println!("tooltip content discarded"))
//!         .build(false)?;
//!
//!     tooltip.set_active(true);
//!     assert!(tooltip.mounted() && !tooltip.rendered());
//!
//!     tokio::time::sleep(Duration::from_millis(160)).await;
//!     assert!(tooltip.rendered());
//!
//!     tooltip.set_active(false);
//!     assert!(!tooltip.rendered());
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod policies;
mod schedulers;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{ControllerBuilder, DiscardFn, Visibility, VisibilityController};
pub use error::VisibilityError;
pub use events::{Bus, Event, EventKind, TimerKind};
pub use policies::{EnterDelay, ExitPolicy, IdleFallback};
pub use schedulers::{Job, ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
