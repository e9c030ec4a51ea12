//! Key combination parser.
//!
//! Parses human-readable key strings like "CmdOrCtrl+Enter" into
//! [`egui::KeyboardShortcut`] values.

use egui::{Key, KeyboardShortcut, Modifiers};
use std::fmt;

/// Error type for key parsing failures.
#[derive(Debug, Clone)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parse a key combination string into a shortcut.
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `Cmd`, `Command`, `Super`, `Meta` - Cmd key on macOS
/// - `CmdOrCtrl` - Cmd on macOS, Ctrl on other platforms
///
/// Keys are anything [`egui::Key::from_name`] accepts: `A`, `1`, `Enter`, `Tab`, `F5`...
pub fn parse_key_combo(s: &str) -> Result<KeyboardShortcut, ParseError> {
    let parts: Vec<&str> = s.split('+').map(str::trim).collect();

    if parts.iter().all(|p| p.is_empty()) {
        return Err(ParseError("Empty key combination".to_string()));
    }

    let mut modifiers = Modifiers::NONE;
    let mut key_part = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;

        let modifier = match part.to_lowercase().as_str() {
            "ctrl" | "control" => Some(Modifiers::CTRL),
            "alt" | "option" => Some(Modifiers::ALT),
            "shift" => Some(Modifiers::SHIFT),
            "cmd" | "command" | "super" | "meta" => Some(Modifiers::MAC_CMD),
            "cmdorctrl" => Some(Modifiers::COMMAND),
            _ => None,
        };

        match modifier {
            Some(_) if is_last => {
                return Err(ParseError(
                    "Key combination ends with modifier, no key specified".to_string(),
                ));
            }
            Some(m) => modifiers = modifiers | m,
            None => {
                if key_part.is_some() {
                    return Err(ParseError(format!(
                        "Multiple keys specified: already have key, found '{}'",
                        part
                    )));
                }
                key_part = Some(*part);
            }
        }
    }

    let key_str = key_part.ok_or_else(|| ParseError("No key specified".to_string()))?;
    let key = parse_key(key_str)?;

    Ok(KeyboardShortcut::new(modifiers, key))
}

fn parse_key(s: &str) -> Result<Key, ParseError> {
    if let Some(key) = Key::from_name(s) {
        return Ok(key);
    }

    // egui names letters in upper case and a few keys in title case
    let mut chars = s.chars();
    let normalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    Key::from_name(&normalized).ok_or_else(|| ParseError(format!("Unknown key: '{}'", s)))
}
