use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::warn;

use crate::capability::DEFAULT_COMPACT_BREAKPOINT_PX;

pub const SETTINGS_FILE: &str = "viewer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    pub selection_delay_ms: u64,
    pub status_tick_ms: u64,
    pub compact_breakpoint_px: u32,
    pub capture_prefix: String,
    pub app_title: String,
    pub catalog_path: Option<PathBuf>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            selection_delay_ms: 500,
            status_tick_ms: 2000,
            compact_breakpoint_px: DEFAULT_COMPACT_BREAKPOINT_PX,
            capture_prefix: "lg".into(),
            app_title: "LG AR Product Viewer v1.0".into(),
            catalog_path: None,
        }
    }
}

impl ViewerSettings {
    pub fn selection_delay(&self) -> Duration {
        Duration::from_millis(self.selection_delay_ms.max(1))
    }

    pub fn status_tick(&self) -> Duration {
        Duration::from_millis(self.status_tick_ms.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    selection_delay_ms: Option<u64>,
    status_tick_ms: Option<u64>,
    compact_breakpoint_px: Option<u32>,
    capture_prefix: Option<String>,
    app_title: Option<String>,
    catalog_path: Option<PathBuf>,
}

/// Defaults, then `viewer.toml` in the working directory, then environment.
pub fn load_settings() -> ViewerSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ViewerSettings {
    let mut settings = ViewerSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(error) => warn!(
                path = %path.display(),
                %error,
                "config: ignoring malformed settings file"
            ),
        }
    }

    apply_env(&mut settings, env);
    settings
}

fn apply_file(settings: &mut ViewerSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.selection_delay_ms {
        settings.selection_delay_ms = v;
    }
    if let Some(v) = file_cfg.status_tick_ms {
        settings.status_tick_ms = v;
    }
    if let Some(v) = file_cfg.compact_breakpoint_px {
        settings.compact_breakpoint_px = v;
    }
    if let Some(v) = file_cfg.capture_prefix {
        settings.capture_prefix = v;
    }
    if let Some(v) = file_cfg.app_title {
        settings.app_title = v;
    }
    if let Some(v) = file_cfg.catalog_path {
        settings.catalog_path = Some(v);
    }
}

/// `VIEWER_<KEY>` is read first, `APP__<KEY>` overrides it.
fn env_value(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    let app = env(&format!("APP__{key}"));
    app.or_else(|| env(&format!("VIEWER_{key}")))
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env_value(env, key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "config: ignoring unparsable environment override");
            None
        }
    }
}

fn apply_env(settings: &mut ViewerSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = parse_env(&env, "SELECTION_DELAY_MS") {
        settings.selection_delay_ms = v;
    }
    if let Some(v) = parse_env(&env, "STATUS_TICK_MS") {
        settings.status_tick_ms = v;
    }
    if let Some(v) = parse_env(&env, "COMPACT_BREAKPOINT_PX") {
        settings.compact_breakpoint_px = v;
    }
    if let Some(v) = env_value(&env, "CAPTURE_PREFIX") {
        settings.capture_prefix = v;
    }
    if let Some(v) = env_value(&env, "APP_TITLE") {
        settings.app_title = v;
    }
    if let Some(v) = env_value(&env, "CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
