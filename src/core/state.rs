//! # Controller state.
//!
//! Everything a controller mutates lives in one [`State`] value behind one lock:
//!
//! ```text
//! State
//!  ├─ active         latest input signal
//!  ├─ visibility     outputs { mounted, rendered }
//!  ├─ mount_started  last false→true transition (None = never shown)
//!  ├─ timer          single slot: Option<PendingTimer>
//!  ├─ epoch          bumped on every transition and on teardown
//!  ├─ config         read on every transition
//!  └─ on_discard     callback cloned out before it runs
//! ```
//!
//! ## Rules
//! - `timer` holds at most one live handle; replacing it cancels the old one.
//! - A job scheduled under epoch `e` applies its effect only while `epoch == e`.
//! - `mount_started` is written on show and never cleared.

use std::time::Instant;

use crate::config::Config;
use crate::events::TimerKind;
use crate::schedulers::TimerHandle;

use super::controller::DiscardFn;

/// The two outputs of a controller.
///
/// Steady state satisfies `rendered ⟹ mounted`; during the enter window content is
/// mounted but not yet rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Visibility {
    /// Content should be present in the render tree.
    pub mounted: bool,
    /// Content is fully transitioned in.
    pub rendered: bool,
}

impl Visibility {
    /// Neither mounted nor rendered.
    pub const HIDDEN: Visibility = Visibility {
        mounted: false,
        rendered: false,
    };

    /// Mounted and rendered.
    pub const SHOWN: Visibility = Visibility {
        mounted: true,
        rendered: true,
    };

    /// Mounted, waiting for the enter delay.
    pub const ENTERING: Visibility = Visibility {
        mounted: true,
        rendered: false,
    };
}

/// The occupant of the timer slot.
pub(super) struct PendingTimer {
    pub kind: TimerKind,
    pub handle: TimerHandle,
}

/// Mutable controller state.
pub(super) struct State {
    pub active: bool,
    pub visibility: Visibility,
    pub mount_started: Option<Instant>,
    pub timer: Option<PendingTimer>,
    pub epoch: u64,
    pub config: Config,
    pub on_discard: Option<DiscardFn>,
}

impl State {
    pub fn new(config: Config, on_discard: Option<DiscardFn>) -> Self {
        Self {
            active: false,
            visibility: Visibility::HIDDEN,
            mount_started: None,
            timer: None,
            epoch: 0,
            config,
            on_discard,
        }
    }

    /// Starts a new epoch, invalidating every job scheduled so far.
    #[inline]
    pub fn next_epoch(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }

    /// Whether the controller has ever been shown.
    #[inline]
    pub fn ever_mounted(&self) -> bool {
        self.mount_started.is_some()
    }
}
