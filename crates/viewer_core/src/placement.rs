//! Simulated AR placement for the demo mode.

use serde::Serialize;
use shared::error::Rejection;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 2.0;

pub const STATUS_MESSAGES: [&str; 4] = [
    "Detecting surface...",
    "Surface found",
    "Tap to place TV",
    "TV placed in AR",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFraming {
    Exploring,
    Fixed,
}

impl CameraFraming {
    pub fn eye(self) -> [f32; 3] {
        match self {
            CameraFraming::Exploring => [2.0, 1.0, 3.0],
            CameraFraming::Fixed => [0.0, 1.5, 3.0],
        }
    }
}

pub fn clamp_scale(scale: f32) -> f32 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArPlacementSimulator {
    placed: bool,
    scale: f32,
    status_index: usize,
}

impl Default for ArPlacementSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArPlacementSimulator {
    pub fn new() -> Self {
        Self {
            placed: false,
            scale: 1.0,
            status_index: 0,
        }
    }

    /// Returns `false` when the object was already placed.
    pub fn place(&mut self) -> bool {
        if self.placed {
            return false;
        }
        self.placed = true;
        true
    }

    pub fn scale_by(&mut self, factor: f32) -> Result<f32, Rejection> {
        if !self.placed {
            return Err(Rejection::NotPlaced);
        }
        if !factor.is_nan() {
            self.scale = clamp_scale(self.scale * factor);
        }
        Ok(self.scale)
    }

    pub fn advance_status(&mut self) {
        self.status_index = (self.status_index + 1) % STATUS_MESSAGES.len();
    }

    pub fn placed(&self) -> bool {
        self.placed
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn status_index(&self) -> usize {
        self.status_index
    }

    pub fn status_message(&self) -> &'static str {
        STATUS_MESSAGES[self.status_index]
    }

    pub fn camera_settled(&self) -> bool {
        self.placed
    }

    pub fn camera_framing(&self) -> CameraFraming {
        if self.camera_settled() {
            CameraFraming::Fixed
        } else {
            CameraFraming::Exploring
        }
    }
}

#[cfg(test)]
#[path = "tests/placement_tests.rs"]
mod tests;
