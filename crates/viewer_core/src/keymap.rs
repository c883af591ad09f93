#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Zero-based catalog position.
    SelectPosition(usize),
    ToggleFullscreen,
    Capture,
}

pub fn shortcut_for(key: char) -> Option<Shortcut> {
    match key {
        '1'..='5' => Some(Shortcut::SelectPosition(key as usize - '1' as usize)),
        'f' | 'F' => Some(Shortcut::ToggleFullscreen),
        's' | 'S' => Some(Shortcut::Capture),
        _ => None,
    }
}

pub const SHORTCUT_HELP: [&str; 3] = [
    "1-5: select product",
    "F: toggle fullscreen",
    "S: capture screenshot",
];
