//! Orchestration core of the product viewer: capability gating, view-mode
//! state machine, per-model interaction state and the simulated AR demo.

use shared::protocol::{HostSignal, ViewerIntent};

pub mod capability;
pub mod capture;
pub mod config;
pub mod controller;
pub mod frame;
pub mod interaction;
pub mod keymap;
pub mod placement;
pub mod runtime;
pub mod scheduler;
pub mod surface;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

pub use capability::CapabilityDetector;
pub use config::{load_settings, ViewerSettings};
pub use controller::{DispatchOutcome, ViewSessionController};
pub use frame::PresentationFrame;
pub use runtime::ViewerRuntime;
pub use scheduler::{ScheduledTask, Scheduler, TimerEvent, TokioScheduler};
pub use surface::{CaptureRequest, HostEnvironment, PresentationSurface};

/// Everything the session reacts to, applied one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Intent(ViewerIntent),
    Host(HostSignal),
    Timer(TimerEvent),
    XrSupportResolved { epoch: u64, supported: bool },
}

impl From<ViewerIntent> for SessionEvent {
    fn from(intent: ViewerIntent) -> Self {
        SessionEvent::Intent(intent)
    }
}

impl From<HostSignal> for SessionEvent {
    fn from(signal: HostSignal) -> Self {
        SessionEvent::Host(signal)
    }
}
