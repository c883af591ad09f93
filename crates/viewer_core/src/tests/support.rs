//! Test doubles shared by the controller and runtime tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use catalog::Catalog;
use shared::protocol::EnvironmentSignals;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{
    config::ViewerSettings,
    controller::ViewSessionController,
    frame::PresentationFrame,
    scheduler::TokioScheduler,
    surface::{CaptureRequest, HostEnvironment, PresentationSurface},
    SessionEvent,
};

pub const PHONE_UA: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36";
pub const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0";

pub fn secure_phone() -> EnvironmentSignals {
    EnvironmentSignals {
        viewport_width: 412,
        url_scheme: "https:".into(),
        user_agent: PHONE_UA.into(),
    }
}

pub fn insecure_compact() -> EnvironmentSignals {
    EnvironmentSignals {
        viewport_width: 600,
        url_scheme: "http:".into(),
        user_agent: DESKTOP_UA.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Fullscreen(bool),
    Capture(CaptureRequest),
}

#[derive(Default)]
pub struct RecordingHost {
    pub ar_supported: bool,
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn supporting_ar() -> Self {
        Self {
            ar_supported: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("host calls lock").clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().expect("host calls lock").push(call);
    }
}

#[async_trait]
impl HostEnvironment for RecordingHost {
    fn request_fullscreen(&self, enter: bool) {
        self.record(HostCall::Fullscreen(enter));
    }

    fn request_capture(&self, request: CaptureRequest) {
        self.record(HostCall::Capture(request));
    }

    async fn probe_immersive_ar(&self) -> bool {
        self.ar_supported
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub frames: Vec<PresentationFrame>,
}

impl PresentationSurface for RecordingSurface {
    fn render(&mut self, frame: &PresentationFrame) {
        self.frames.push(frame.clone());
    }
}

pub struct Harness {
    pub controller: ViewSessionController,
    pub events: UnboundedReceiver<SessionEvent>,
    pub host: Arc<RecordingHost>,
}

impl Harness {
    pub fn new(environment: EnvironmentSignals) -> Self {
        Self::build(Catalog::builtin(), environment, RecordingHost::default())
    }

    pub fn build(catalog: Catalog, environment: EnvironmentSignals, host: RecordingHost) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let host = Arc::new(host);
        let controller = ViewSessionController::new(
            catalog,
            ViewerSettings::default(),
            environment,
            Arc::new(TokioScheduler::new(tx)),
            host.clone(),
        );
        Self {
            controller,
            events,
            host,
        }
    }

    /// Lets virtual time pass, then applies whatever the timers posted.
    pub async fn advance(&mut self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        self.drain();
    }

    pub fn drain(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.controller.dispatch(event);
        }
    }
}
