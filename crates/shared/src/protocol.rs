use serde::{Deserialize, Serialize};

use crate::domain::{ProductId, ScenePreset, ViewMode};

/// User intents emitted by the presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ViewerIntent {
    SelectProduct { product_id: ProductId },
    RequestMode { mode: ViewMode },
    ExitImmersive,
    ToggleFullscreen,
    Capture,
    SetScenePreset { preset: ScenePreset },
    HoverEnter,
    HoverLeave,
    Activate,
    Place,
    ScaleBy { factor: f32 },
    Key { key: char },
}

/// Raw environment facts the capability detector is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSignals {
    pub viewport_width: u32,
    /// Page transport scheme, with or without the trailing colon (`https:`).
    pub url_scheme: String,
    pub user_agent: String,
}

impl Default for EnvironmentSignals {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            url_scheme: "http".into(),
            user_agent: String::new(),
        }
    }
}

/// Notifications pushed by the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum HostSignal {
    Resized { viewport_width: u32 },
    EnvironmentChanged(EnvironmentSignals),
    FullscreenChanged { active: bool },
    XrSessionStarted,
    XrSessionEnded,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
