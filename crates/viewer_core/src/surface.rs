//! Seams to the rendering surface and the host environment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::domain::ProductId;

use crate::frame::PresentationFrame;

/// Receives a fresh frame after every applied state change.
pub trait PresentationSurface {
    fn render(&mut self, frame: &PresentationFrame);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureRequest {
    pub file_name: String,
    pub product_id: Option<ProductId>,
    pub requested_at: DateTime<Utc>,
}

/// Host services. Requests are fire-and-forget; only the probe returns data.
#[async_trait]
pub trait HostEnvironment: Send + Sync {
    fn request_fullscreen(&self, enter: bool);
    fn request_capture(&self, request: CaptureRequest);
    async fn probe_immersive_ar(&self) -> bool;
}
