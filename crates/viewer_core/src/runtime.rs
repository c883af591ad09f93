//! Single-consumer event loop around the session controller.

use std::{sync::Arc, time::Duration};

use catalog::Catalog;
use shared::protocol::EnvironmentSignals;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time::{sleep_until, Instant},
};
use tracing::debug;

use crate::{
    config::ViewerSettings,
    controller::{DispatchOutcome, ViewSessionController},
    scheduler::TokioScheduler,
    surface::{HostEnvironment, PresentationSurface},
    SessionEvent,
};

pub struct ViewerRuntime<S> {
    controller: ViewSessionController,
    events: UnboundedReceiver<SessionEvent>,
    sender: UnboundedSender<SessionEvent>,
    surface: S,
}

impl<S: PresentationSurface> ViewerRuntime<S> {
    /// Must be called from within a tokio runtime. Renders the initial frame.
    pub fn new(
        catalog: Catalog,
        settings: ViewerSettings,
        environment: EnvironmentSignals,
        host: Arc<dyn HostEnvironment>,
        mut surface: S,
    ) -> Self {
        let (sender, events) = mpsc::unbounded_channel();
        let scheduler = Arc::new(TokioScheduler::new(sender.clone()));
        let controller = ViewSessionController::new(catalog, settings, environment, scheduler, host);
        surface.render(&controller.frame());
        Self {
            controller,
            events,
            sender,
            surface,
        }
    }

    /// Handle for feeding intents and host signals from other tasks.
    pub fn sender(&self) -> UnboundedSender<SessionEvent> {
        self.sender.clone()
    }

    pub fn controller(&self) -> &ViewSessionController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn dispatch(&mut self, event: impl Into<SessionEvent>) -> DispatchOutcome {
        let outcome = self.controller.dispatch(event.into());
        if outcome.is_applied() {
            self.surface.render(&self.controller.frame());
        }
        outcome
    }

    /// Applies every event already queued without waiting.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Processes queued and arriving events until `duration` has elapsed.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let event = tokio::select! {
                _ = sleep_until(deadline) => None,
                event = self.events.recv() => event,
            };
            match event {
                Some(event) => {
                    self.dispatch(event);
                }
                None => break,
            }
        }
        debug!(elapsed_ms = duration.as_millis() as u64, "runtime: wait finished");
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
