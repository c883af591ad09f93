//! Immutable view parameters handed to the presentation surface.

use catalog::CatalogStats;
use serde::Serialize;
use shared::domain::{
    CapabilitySnapshot, Product, ProductId, SceneOptions, ScenePreset, ViewMode,
};

use crate::{
    interaction::{ModelInteractionState, Tint},
    placement::{ArPlacementSimulator, CameraFraming},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChromeVisibility {
    pub product_selector: bool,
    pub info_panel: bool,
    pub view_controls: bool,
    pub shortcut_help: bool,
    pub ar_real_button: bool,
    pub ar_demo_button: bool,
    pub loading_overlay: bool,
}

impl ChromeVisibility {
    pub fn derive(mode: ViewMode, capabilities: CapabilitySnapshot, is_loading: bool) -> Self {
        let browsing = !mode.is_immersive();
        Self {
            product_selector: browsing,
            info_panel: browsing,
            view_controls: browsing,
            shortcut_help: browsing,
            ar_real_button: browsing && capabilities.ar_real_available(),
            ar_demo_button: browsing,
            loading_overlay: is_loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelView {
    pub product_id: ProductId,
    pub hovered: bool,
    pub selected: bool,
    pub floating: bool,
    pub display_scale: f32,
    pub tint: Tint,
    pub tint_color: String,
    pub show_info_overlay: bool,
    pub show_selection_effects: bool,
}

impl ModelView {
    pub fn new(product: &Product, state: &ModelInteractionState, base_scale: f32) -> Self {
        let tint = state.tint();
        Self {
            product_id: product.id,
            hovered: state.hovered(),
            selected: state.selected(),
            floating: state.floating(),
            display_scale: state.display_scale(base_scale),
            tint,
            tint_color: tint.color(&product.color).to_string(),
            show_info_overlay: state.shows_info_overlay(),
            show_selection_effects: state.shows_selection_effects(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementView {
    pub placed: bool,
    pub scale: f32,
    pub status_index: usize,
    pub status_message: &'static str,
    pub camera_settled: bool,
    pub camera_framing: CameraFraming,
    pub camera_eye: [f32; 3],
}

impl From<&ArPlacementSimulator> for PlacementView {
    fn from(sim: &ArPlacementSimulator) -> Self {
        Self {
            placed: sim.placed(),
            scale: sim.scale(),
            status_index: sim.status_index(),
            status_message: sim.status_message(),
            camera_settled: sim.camera_settled(),
            camera_framing: sim.camera_framing(),
            camera_eye: sim.camera_framing().eye(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XrSupport {
    Checking,
    Supported,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArRealView {
    pub xr_support: XrSupport,
    pub in_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationFrame {
    pub mode: ViewMode,
    pub is_immersive: bool,
    pub is_loading: bool,
    pub is_fullscreen: bool,
    pub selected_product: Option<Product>,
    pub capabilities: CapabilitySnapshot,
    pub chrome: ChromeVisibility,
    pub scene_preset: ScenePreset,
    pub scene: SceneOptions,
    pub catalog: CatalogStats,
    pub model: Option<ModelView>,
    pub placement: Option<PlacementView>,
    pub ar_real: Option<ArRealView>,
    pub watermark: String,
}

pub fn watermark(app_title: &str, mode: ViewMode) -> String {
    match mode {
        ViewMode::Normal => app_title.to_string(),
        ViewMode::ArReal => format!("{app_title} (AR Real)"),
        ViewMode::ArDemo => format!("{app_title} (Demo AR)"),
    }
}
