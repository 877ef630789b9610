//! # Example: fast_toggle
//!
//! Replays a bursty hover signal against a controller on a [`ManualScheduler`], printing
//! the outputs after every step and counting events with a custom subscriber.
//!
//! Demonstrates how to:
//! - Simulate time deterministically with [`ManualScheduler::advance`].
//! - Implement the [`Subscribe`] trait.
//! - Observe that rapid toggles never stack timers.
//!
//! ## Run
//! ```bash
//! cargo run --example fast_toggle
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use delayvisor::{Config, Event, EventKind, ManualScheduler, Subscribe, VisibilityController};

/// Counts scheduled and cancelled timers.
#[derive(Default)]
struct TimerStats {
    scheduled: AtomicUsize,
    cancelled: AtomicUsize,
}

#[async_trait]
impl Subscribe for TimerStats {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::TimerScheduled => {
                self.scheduled.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::TimerCancelled => {
                self.cancelled.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "timer-stats"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sched = ManualScheduler::new();
    let stats = Arc::new(TimerStats::default());
    let discards = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&discards);

    let panel = VisibilityController::builder(Config::from_millis(500, 1000)?)
        .with_name("panel")
        .with_scheduler(Arc::new(sched.clone()))
        .with_subscribers(vec![Arc::clone(&stats) as Arc<dyn Subscribe>])
        .on_discard(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .build(false)?;

    // (signal, milliseconds to wait afterwards)
    let script = [
        (true, 100),
        (false, 20),
        (true, 40),
        (false, 10),
        (true, 700),
        (false, 1200),
    ];

    for (active, wait) in script {
        panel.set_active(active);
        println!(
            "t={:?} active={active} -> {:?} pending={:?}",
            sched.elapsed(),
            panel.snapshot(),
            panel.pending_timer()
        );
        sched.advance(Duration::from_millis(wait));
        println!("t={:?} -> {:?}", sched.elapsed(), panel.snapshot());
    }

    drop(panel);
    // Let the subscriber worker drain.
    tokio::time::sleep(Duration::from_millis(10)).await;

    println!(
        "timers scheduled={} cancelled={} discards={}",
        stats.scheduled.load(Ordering::Relaxed),
        stats.cancelled.load(Ordering::Relaxed),
        discards.load(Ordering::Relaxed)
    );
    Ok(())
}
