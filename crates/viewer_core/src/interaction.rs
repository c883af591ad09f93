//! Hover/select state for a single rendered product model.

use serde::Serialize;

pub const SELECTED_SCALE_FACTOR: f32 = 1.15;
pub const HOVER_TINT: &str = "#ff6b6b";
pub const SELECTED_TINT: &str = "#4ecdc4";
pub const FALLBACK_BASE_TINT: &str = "#2c3e50";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tint {
    Hovered,
    Selected,
    Base,
}

impl Tint {
    pub fn color<'a>(self, base_color: &'a str) -> &'a str {
        match self {
            Tint::Hovered => HOVER_TINT,
            Tint::Selected => SELECTED_TINT,
            Tint::Base if base_color.is_empty() => FALLBACK_BASE_TINT,
            Tint::Base => base_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInteractionState {
    interactive: bool,
    hovered: bool,
    selected: bool,
}

impl ModelInteractionState {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            hovered: false,
            selected: false,
        }
    }

    pub fn interactive() -> Self {
        Self::new(true)
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Returns whether the state changed.
    pub fn on_hover_enter(&mut self) -> bool {
        self.set_hovered(true)
    }

    pub fn on_hover_leave(&mut self) -> bool {
        self.set_hovered(false)
    }

    fn set_hovered(&mut self, hovered: bool) -> bool {
        if !self.interactive || self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        true
    }

    /// Click or tap. Toggles selection; floating follows it.
    pub fn on_activate(&mut self) -> bool {
        if !self.interactive {
            return false;
        }
        self.selected = !self.selected;
        true
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn floating(&self) -> bool {
        self.selected
    }

    pub fn display_scale(&self, base_scale: f32) -> f32 {
        if self.selected {
            base_scale * SELECTED_SCALE_FACTOR
        } else {
            base_scale
        }
    }

    pub fn tint(&self) -> Tint {
        if self.hovered {
            Tint::Hovered
        } else if self.selected {
            Tint::Selected
        } else {
            Tint::Base
        }
    }

    pub fn shows_info_overlay(&self) -> bool {
        self.hovered || self.selected
    }

    /// Ground ring and particles.
    pub fn shows_selection_effects(&self) -> bool {
        self.selected
    }
}

#[cfg(test)]
#[path = "tests/interaction_tests.rs"]
mod tests;
