//! Controller core: state machine, timer slot and construction.
//!
//! The only public API from this module is [`VisibilityController`], its
//! [`ControllerBuilder`], and the [`Visibility`] output pair.
//!
//! Internal modules:
//! - [`state`]: outputs, the single timer slot and the transition epoch;
//! - [`controller`]: show/hide transitions and timer callbacks;
//! - [`builder`]: validation, scheduler selection and subscriber wiring.

mod builder;
mod controller;
mod state;

pub use builder::ControllerBuilder;
pub use controller::{DiscardFn, VisibilityController};
pub use state::Visibility;
