use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    error::VisibilityError,
    events::{Bus, Event},
    schedulers::{Scheduler, TokioScheduler},
    subscribers::{Subscribe, SubscriberSet},
};

use super::controller::{DiscardFn, VisibilityController};

/// Builder for constructing a [`VisibilityController`] with optional features.
pub struct ControllerBuilder {
    cfg: Config,
    scheduler: Option<Arc<dyn Scheduler>>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    name: Option<Arc<str>>,
    on_discard: Option<DiscardFn>,
}

impl ControllerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            scheduler: None,
            subscribers: Vec::new(),
            name: None,
            on_discard: None,
        }
    }

    /// Sets the scheduler. Defaults to a [`TokioScheduler`] on the current runtime.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive controller events through dedicated workers with bounded
    /// queues; this requires a tokio runtime at build time.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Names the controller; the name is attached to every event it publishes.
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the callback invoked when content is unmounted after having been shown.
    pub fn on_discard<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_discard = Some(Arc::new(callback));
        self
    }

    /// Builds the controller and evaluates `initial_active`.
    ///
    /// This consumes the builder and initializes:
    /// - configuration validation
    /// - the scheduler (given, or tokio on the current runtime)
    /// - the event bus
    /// - subscriber workers and their listener (if any subscribers were set)
    pub fn build(self, initial_active: bool) -> Result<VisibilityController, VisibilityError> {
        self.cfg.validate()?;

        let scheduler: Arc<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::current()?),
        };
        let bus = Bus::new(self.cfg.bus_capacity_clamped());

        let listener = if self.subscribers.is_empty() {
            None
        } else {
            let runtime = Handle::try_current().map_err(|_| {
                VisibilityError::RuntimeUnavailable {
                    component: "SubscriberSet",
                }
            })?;
            let set = SubscriberSet::new(self.subscribers, bus.clone(), &runtime);
            let token = CancellationToken::new();
            spawn_listener(&runtime, bus.subscribe(), set, token.clone());
            Some(token)
        };

        Ok(VisibilityController::assemble(
            self.cfg,
            scheduler,
            bus,
            self.name,
            self.on_discard,
            listener,
            initial_active,
        ))
    }
}

/// Forwards bus events to the subscriber set until the controller is dropped, then
/// drains the subscriber queues.
///
/// The receiver is created before the controller evaluates its initial value, so
/// subscribers observe the construction-time events too.
fn spawn_listener(
    runtime: &Handle,
    mut rx: broadcast::Receiver<Event>,
    set: SubscriberSet,
    token: CancellationToken,
) {
    runtime.spawn(async move {
        loop {
            tokio::select! {
                biased;
                res = rx.recv() => match res {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = token.cancelled() => {
                    while let Ok(ev) = rx.try_recv() {
                        set.emit(&ev);
                    }
                    break;
                }
            }
        }
        set.shutdown().await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Visibility;
    use crate::events::EventKind;
    use crate::schedulers::ManualScheduler;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Forward(mpsc::UnboundedSender<EventKind>);

    #[async_trait]
    impl Subscribe for Forward {
        async fn on_event(&self, event: &Event) {
            let _ = self.0.send(event.kind);
        }

        fn name(&self) -> &'static str {
            "forward"
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = Config::default().with_idle_timeout(Duration::ZERO);
        let err = ControllerBuilder::new(cfg)
            .with_scheduler(Arc::new(ManualScheduler::new()))
            .build(false)
            .unwrap_err();
        assert_eq!(err.as_label(), "invalid_configuration");
    }

    #[test]
    fn test_default_scheduler_needs_runtime() {
        let err = ControllerBuilder::new(Config::default())
            .build(false)
            .unwrap_err();
        assert_eq!(
            err,
            VisibilityError::RuntimeUnavailable {
                component: "TokioScheduler"
            }
        );
    }

    #[test]
    fn test_subscribers_need_runtime() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let err = ControllerBuilder::new(Config::default())
            .with_scheduler(Arc::new(ManualScheduler::new()))
            .with_subscribers(vec![Arc::new(Forward(tx)) as Arc<dyn Subscribe>])
            .build(false)
            .unwrap_err();
        assert_eq!(err.as_label(), "runtime_unavailable");
    }

    #[tokio::test]
    async fn test_subscribers_receive_initial_and_later_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sched = ManualScheduler::new();
        let ctl = ControllerBuilder::new(Config::default())
            .with_scheduler(Arc::new(sched))
            .with_subscribers(vec![Arc::new(Forward(tx)) as Arc<dyn Subscribe>])
            .build(true)
            .unwrap();
        assert_eq!(ctl.snapshot(), Visibility::SHOWN);

        ctl.set_active(false);
        drop(ctl);

        let mut kinds = Vec::new();
        while let Some(kind) = rx.recv().await {
            kinds.push(kind);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::ShowRequested,
                EventKind::Mounted,
                EventKind::Rendered,
                EventKind::HideRequested,
                EventKind::RenderRevoked,
                EventKind::Unmounted,
                EventKind::Discarded,
            ]
        );
    }
}
