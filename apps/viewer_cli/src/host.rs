//! Headless stand-ins for the host environment and rendering surface.

use std::io::Write;

use async_trait::async_trait;
use tracing::{error, info};
use viewer_core::{CaptureRequest, HostEnvironment, PresentationFrame, PresentationSurface};

pub struct ConsoleHost {
    xr_supported: bool,
}

impl ConsoleHost {
    pub fn new(xr_supported: bool) -> Self {
        Self { xr_supported }
    }
}

#[async_trait]
impl HostEnvironment for ConsoleHost {
    fn request_fullscreen(&self, enter: bool) {
        info!(enter, "host: fullscreen requested");
    }

    fn request_capture(&self, request: CaptureRequest) {
        info!(
            file_name = %request.file_name,
            product_id = ?request.product_id,
            "host: capture requested"
        );
    }

    async fn probe_immersive_ar(&self) -> bool {
        self.xr_supported
    }
}

/// Writes each frame as one JSON document per line (or pretty-printed).
pub struct JsonSurface<W> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonSurface<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSurface for JsonSurface<W> {
    fn render(&mut self, frame: &PresentationFrame) {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(frame)
        } else {
            serde_json::to_string(frame)
        };
        let result = encoded
            .map_err(std::io::Error::from)
            .and_then(|json| writeln!(self.out, "{json}"));
        if let Err(error) = result {
            error!(%error, "surface: failed to write frame");
        }
    }
}
