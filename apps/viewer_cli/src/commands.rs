//! Line-oriented command language for driving a session.

use shared::{
    domain::{ProductId, ScenePreset, ViewMode},
    protocol::{HostSignal, ViewerIntent},
};
use thiserror::Error;
use viewer_core::SessionEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Event(SessionEvent),
    Wait { millis: u64 },
    Frame,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid argument '{value}' for '{command}'")]
    InvalidArgument { command: &'static str, value: String },
}

/// Blank lines and `#` comments parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let intent = |intent: ViewerIntent| ScriptCommand::Event(SessionEvent::Intent(intent));
    let host = |signal: HostSignal| ScriptCommand::Event(SessionEvent::Host(signal));

    let command = match head.to_ascii_lowercase().as_str() {
        "select" => intent(ViewerIntent::SelectProduct {
            product_id: ProductId(parse_arg("select", "a product id", arg)?),
        }),
        "key" => {
            let raw = require("key", "a single character", arg)?;
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => intent(ViewerIntent::Key { key }),
                _ => {
                    return Err(CommandError::InvalidArgument {
                        command: "key",
                        value: raw.to_string(),
                    })
                }
            }
        }
        "mode" => intent(ViewerIntent::RequestMode {
            mode: parse_mode(require("mode", "normal, ar-real or ar-demo", arg)?)?,
        }),
        "exit" => intent(ViewerIntent::ExitImmersive),
        "fullscreen" => intent(ViewerIntent::ToggleFullscreen),
        "capture" => intent(ViewerIntent::Capture),
        "preset" => intent(ViewerIntent::SetScenePreset {
            preset: parse_preset(require("preset", "standard, ar-ready or presentation", arg)?)?,
        }),
        "hover" => intent(ViewerIntent::HoverEnter),
        "leave" => intent(ViewerIntent::HoverLeave),
        "click" | "tap" => intent(ViewerIntent::Activate),
        "place" => intent(ViewerIntent::Place),
        "scale" => intent(ViewerIntent::ScaleBy {
            factor: parse_arg("scale", "a scale factor", arg)?,
        }),
        "resize" => host(HostSignal::Resized {
            viewport_width: parse_arg("resize", "a viewport width", arg)?,
        }),
        "fullscreen-changed" => host(HostSignal::FullscreenChanged {
            active: parse_switch(require("fullscreen-changed", "on or off", arg)?)?,
        }),
        "xr-start" => host(HostSignal::XrSessionStarted),
        "xr-end" => host(HostSignal::XrSessionEnded),
        "wait" => ScriptCommand::Wait {
            millis: parse_arg("wait", "a duration in milliseconds", arg)?,
        },
        "frame" => ScriptCommand::Frame,
        "quit" => ScriptCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn require<'a>(
    command: &'static str,
    expected: &'static str,
    arg: Option<&'a str>,
) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument { command, expected })
}

fn parse_arg<T: std::str::FromStr>(
    command: &'static str,
    expected: &'static str,
    arg: Option<&str>,
) -> Result<T, CommandError> {
    let raw = require(command, expected, arg)?;
    raw.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: raw.to_string(),
    })
}

fn parse_mode(raw: &str) -> Result<ViewMode, CommandError> {
    match raw.to_ascii_lowercase().replace('_', "-").as_str() {
        "normal" => Ok(ViewMode::Normal),
        "ar-real" | "ar" => Ok(ViewMode::ArReal),
        "ar-demo" | "demo" => Ok(ViewMode::ArDemo),
        _ => Err(CommandError::InvalidArgument {
            command: "mode",
            value: raw.to_string(),
        }),
    }
}

fn parse_preset(raw: &str) -> Result<ScenePreset, CommandError> {
    match raw.to_ascii_lowercase().replace('_', "-").as_str() {
        "standard" | "normal" => Ok(ScenePreset::Standard),
        "ar-ready" => Ok(ScenePreset::ArReady),
        "presentation" => Ok(ScenePreset::Presentation),
        _ => Err(CommandError::InvalidArgument {
            command: "preset",
            value: raw.to_string(),
        }),
    }
}

fn parse_switch(raw: &str) -> Result<bool, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(CommandError::InvalidArgument {
            command: "fullscreen-changed",
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
