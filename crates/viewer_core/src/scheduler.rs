//! Cancellable timers that post back into the session event queue.

use std::{sync::Arc, time::Duration};

use shared::domain::ProductId;
use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{interval_at, sleep_until, Instant},
};
use tracing::debug;

use crate::{surface::HostEnvironment, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    SelectionLoaded {
        generation: u64,
        product_id: ProductId,
    },
    StatusTick {
        epoch: u64,
    },
}

/// Handle to a scheduled task. Dropping it cancels the task.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    pub fn from_handle(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// A handle with nothing behind it.
    pub fn detached() -> Self {
        Self { handle: None }
    }

    pub fn cancel(mut self) {
        self.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.abort();
    }
}

pub trait Scheduler: Send + Sync {
    fn schedule_once(&self, delay: Duration, event: TimerEvent) -> ScheduledTask;
    /// First delivery happens one `period` after scheduling.
    fn schedule_repeating(&self, period: Duration, event: TimerEvent) -> ScheduledTask;
    /// Runs the host's immersive-AR probe and reports the answer for `epoch`.
    fn spawn_xr_probe(&self, host: Arc<dyn HostEnvironment>, epoch: u64) -> ScheduledTask;
}

#[derive(Debug, Clone)]
pub struct TokioScheduler {
    events: UnboundedSender<SessionEvent>,
}

impl TokioScheduler {
    pub fn new(events: UnboundedSender<SessionEvent>) -> Self {
        Self { events }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, event: TimerEvent) -> ScheduledTask {
        let deadline = Instant::now() + delay;
        let events = self.events.clone();
        ScheduledTask::from_handle(tokio::spawn(async move {
            sleep_until(deadline).await;
            if events.send(SessionEvent::Timer(event)).is_err() {
                debug!(?event, "scheduler: session gone before timer fired");
            }
        }))
    }

    fn schedule_repeating(&self, period: Duration, event: TimerEvent) -> ScheduledTask {
        let mut ticker = interval_at(Instant::now() + period, period);
        let events = self.events.clone();
        ScheduledTask::from_handle(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                if events.send(SessionEvent::Timer(event)).is_err() {
                    debug!(?event, "scheduler: session gone, stopping ticker");
                    break;
                }
            }
        }))
    }

    fn spawn_xr_probe(&self, host: Arc<dyn HostEnvironment>, epoch: u64) -> ScheduledTask {
        let events = self.events.clone();
        ScheduledTask::from_handle(tokio::spawn(async move {
            let supported = host.probe_immersive_ar().await;
            let _ = events.send(SessionEvent::XrSupportResolved { epoch, supported });
        }))
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
