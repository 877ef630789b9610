//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [show] controller=tooltip
//! [mounted] controller=tooltip
//! [timer-scheduled] controller=tooltip timer=enter delay=300ms
//! [timer-fired] controller=tooltip timer=enter
//! [rendered] controller=tooltip
//! [hide] controller=tooltip elapsed=420ms exit_delay=200ms
//! [render-revoked] controller=tooltip
//! [unmounted] controller=tooltip
//! [discarded] controller=tooltip
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use - implement a
/// custom [`Subscribe`] for structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let name = e.controller.as_deref().unwrap_or("-");
        let timer = e.timer.map(|t| t.as_label()).unwrap_or("-");

        match e.kind {
            EventKind::ShowRequested => println!("[show] controller={name}"),
            EventKind::HideRequested => match e.elapsed_ms {
                Some(elapsed) => println!(
                    "[hide] controller={name} elapsed={elapsed}ms exit_delay={}ms",
                    e.delay_ms.unwrap_or(0)
                ),
                None => println!(
                    "[hide] controller={name} never-shown exit_delay={}ms",
                    e.delay_ms.unwrap_or(0)
                ),
            },
            EventKind::Mounted => println!("[mounted] controller={name}"),
            EventKind::Rendered => println!("[rendered] controller={name}"),
            EventKind::RenderRevoked => println!("[render-revoked] controller={name}"),
            EventKind::Unmounted => println!("[unmounted] controller={name}"),
            EventKind::Discarded => println!("[discarded] controller={name}"),
            EventKind::TimerScheduled => println!(
                "[timer-scheduled] controller={name} timer={timer} delay={}ms",
                e.delay_ms.unwrap_or(0)
            ),
            EventKind::TimerCancelled => {
                println!("[timer-cancelled] controller={name} timer={timer}")
            }
            EventKind::TimerFired => println!("[timer-fired] controller={name} timer={timer}"),
            EventKind::SubscriberOverflow => println!(
                "[subscriber-overflow] subscriber={name} reason={}",
                e.reason.as_deref().unwrap_or("unknown")
            ),
            EventKind::SubscriberPanicked => println!(
                "[subscriber-panicked] subscriber={name} info={}",
                e.reason.as_deref().unwrap_or("unknown")
            ),
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
