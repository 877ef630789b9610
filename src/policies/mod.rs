//! Timing policies.
//!
//! This module groups the knobs that control **when** a controller marks content
//! rendered and **how long** it keeps content mounted after a hide request.
//!
//! ## Contents
//! - [`EnterDelay`]   wait before `rendered` becomes true (immediate / fixed / deferred)
//! - [`ExitPolicy`]   effective unmount delay, with the fast-toggle optimization
//! - [`IdleFallback`] what a deferred enter does when the scheduler has no idle class
//!
//! ## Quick wiring
//! ```text
//! Config { enter_delay, exit_delay, idle_timeout, idle_fallback }
//!      └─► core::controller uses:
//!           - enter_delay to pick the show path (sync / timer / idle)
//!           - ExitPolicy::effective_delay(elapsed) on the hide path
//!           - idle_fallback.delay(idle_timeout) if idle scheduling is unavailable
//! ```
//!
//! ## Defaults
//! - `EnterDelay::Immediate` (render on the same call that mounts).
//! - `exit_delay = 0` (unmount on the same call that hides).
//! - `IdleFallback::Delay(1ms)` (next tick).

mod enter;
mod exit;
mod fallback;

pub use enter::EnterDelay;
pub use exit::ExitPolicy;
pub use fallback::IdleFallback;
