//! Controller events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by a visibility controller and by
//! subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`TimerKind`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `VisibilityController` (transitions, timers), `SubscriberSet`
//!   workers (overflow/panic).
//! - **Consumers**: `VisibilityController::events()` receivers and the subscriber
//!   listener spawned by the builder (fans out to `SubscriberSet`).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, TimerKind};
