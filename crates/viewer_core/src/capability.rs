//! Device capability probing from raw environment signals.

use std::sync::LazyLock;

use regex::Regex;
use shared::{domain::CapabilitySnapshot, protocol::EnvironmentSignals};

static HANDHELD_USER_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("handheld user-agent pattern is valid")
});

pub const DEFAULT_COMPACT_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDetector {
    compact_breakpoint_px: u32,
}

impl Default for CapabilityDetector {
    fn default() -> Self {
        Self::new(DEFAULT_COMPACT_BREAKPOINT_PX)
    }
}

impl CapabilityDetector {
    pub fn new(compact_breakpoint_px: u32) -> Self {
        Self {
            compact_breakpoint_px,
        }
    }

    /// Pure over `signals`; a missing or unrecognised signal reads as `false`.
    pub fn evaluate(&self, signals: &EnvironmentSignals) -> CapabilitySnapshot {
        CapabilitySnapshot {
            is_compact_layout: signals.viewport_width <= self.compact_breakpoint_px,
            is_secure_transport: is_secure_scheme(&signals.url_scheme),
            is_handheld_device: HANDHELD_USER_AGENT.is_match(&signals.user_agent),
        }
    }
}

fn is_secure_scheme(scheme: &str) -> bool {
    scheme
        .trim()
        .trim_end_matches(':')
        .eq_ignore_ascii_case("https")
}

#[cfg(test)]
#[path = "tests/capability_tests.rs"]
mod tests;
