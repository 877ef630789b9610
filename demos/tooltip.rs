//! # Example: tooltip
//!
//! A tooltip that appears 300ms after hover starts and lingers up to 200ms after hover ends.
//!
//! Demonstrates how to:
//! - Build a [`VisibilityController`] with a name, a discard callback and [`LogWriter`].
//! - Drive it from a stream of hover changes.
//! - Re-render from the [`Visibility`] watch channel.
//!
//! ## Flow
//! ```text
//! hover on  ──► set_active(true)  ──► mounted ──(300ms)──► rendered
//! hover off ──► set_active(false) ──► render revoked ──(≤200ms)──► unmounted ─► discard
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example tooltip --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use delayvisor::{Config, LogWriter, Subscribe, Visibility, VisibilityController};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_millis(300, 200)?;
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    let tooltip = VisibilityController::builder(cfg)
        .with_name("tooltip")
        .with_subscribers(subs)
        .on_discard(|| println!("[host] tooltip content released"))
        .build(false)?;

    // Host render loop: redraw whenever the outputs change.
    let mut outputs = tooltip.watch();
    let render = tokio::spawn(async move {
        while outputs.changed().await.is_ok() {
            let Visibility { mounted, rendered } = *outputs.borrow_and_update();
            let style = match (mounted, rendered) {
                (false, _) => "<nothing>",
                (true, false) => "<tooltip opacity=0>",
                (true, true) => "<tooltip opacity=1>",
            };
            println!("[host] render {style}");
        }
    });

    // Hover for long enough to fully show, then leave.
    tooltip.set_active(true);
    tokio::time::sleep(Duration::from_millis(500)).await;
    tooltip.set_active(false);
    tokio::time::sleep(Duration::from_millis(300)).await;

    // A brush-past: hover ends before the enter delay, nothing lingers.
    tooltip.set_active(true);
    tokio::time::sleep(Duration::from_millis(80)).await;
    tooltip.set_active(false);
    tokio::time::sleep(Duration::from_millis(50)).await;

    drop(tooltip);
    let _ = render.await;
    Ok(())
}
