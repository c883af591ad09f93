use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);
    };
}

id_newtype!(ProductId);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical size of a product in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Dimensions {
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.depth > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub model: String,
    pub price: f64,
    pub category: String,
    pub dimensions: Dimensions,
    /// Display hint, usually a `#rrggbb` string.
    pub color: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Normal,
    ArReal,
    ArDemo,
}

impl ViewMode {
    pub fn is_immersive(self) -> bool {
        self != ViewMode::Normal
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Normal => "normal",
            ViewMode::ArReal => "ar_real",
            ViewMode::ArDemo => "ar_demo",
        }
    }
}

/// Normal-mode staging of the 3D scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePreset {
    #[default]
    Standard,
    ArReady,
    Presentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneOptions {
    pub show_grid: bool,
    pub show_environment: bool,
    pub auto_rotate: bool,
}

impl ScenePreset {
    pub fn scene_options(self) -> SceneOptions {
        SceneOptions {
            show_grid: self != ScenePreset::ArReady,
            show_environment: self == ScenePreset::Presentation,
            auto_rotate: self == ScenePreset::Presentation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilitySnapshot {
    pub is_compact_layout: bool,
    pub is_secure_transport: bool,
    pub is_handheld_device: bool,
}

impl CapabilitySnapshot {
    /// Real camera-anchored AR needs a secure origin on a handheld device.
    pub fn ar_real_available(&self) -> bool {
        self.is_secure_transport && self.is_handheld_device
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
