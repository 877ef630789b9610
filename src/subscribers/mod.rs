//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`] fan-out used
//! to hand controller events to user code without blocking the controller.
//!
//! ## Architecture
//! ```text
//! VisibilityController ── publish(Event) ──► Bus ──► subscriber listener
//!                                                         │
//!                                                  SubscriberSet::emit
//!                                               ┌─────────┼─────────┐
//!                                               ▼         ▼         ▼
//!                                           LogWriter  Metrics   Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use delayvisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct DiscardCounter;
//!
//! #[async_trait]
//! impl Subscribe for DiscardCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::Discarded {
//!             // increment a counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "discard-counter" }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
