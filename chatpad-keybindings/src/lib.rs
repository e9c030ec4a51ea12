//! Keybinding system for chatpad.
//!
//! Bindings come from `config.yaml` as `{ key, action }` pairs. Each frame the
//! app asks the registry which action, if any, was triggered and the matching
//! key press is consumed so the editor never sees it.

pub mod parser;

pub use parser::{ParseError, parse_key_combo};

use chatpad_config::KeyBinding;
use egui::KeyboardShortcut;

/// Registry of keybindings mapping shortcuts to action names.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    /// Ordered most-specific first so `Ctrl+Shift+T` wins over `Ctrl+T`
    bindings: Vec<(KeyboardShortcut, String)>,
}

fn modifier_count(shortcut: &KeyboardShortcut) -> usize {
    let m = shortcut.modifiers;
    [m.alt, m.ctrl || m.command, m.shift, m.mac_cmd]
        .into_iter()
        .filter(|&set| set)
        .count()
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config keybindings.
    ///
    /// Invalid keybinding strings are logged and skipped.
    pub fn from_config(keybindings: &[KeyBinding]) -> Self {
        let mut registry = Self::new();

        for binding in keybindings {
            match parse_key_combo(&binding.key) {
                Ok(shortcut) => {
                    log::debug!("Registered keybinding: {} -> {}", binding.key, binding.action);
                    registry.bindings.push((shortcut, binding.action.clone()));
                }
                Err(e) => {
                    log::warn!(
                        "Invalid keybinding '{}' for action '{}': {}",
                        binding.key,
                        binding.action,
                        e
                    );
                }
            }
        }

        registry
            .bindings
            .sort_by_key(|(shortcut, _)| std::cmp::Reverse(modifier_count(shortcut)));

        log::info!(
            "Keybinding registry initialized with {} bindings",
            registry.bindings.len()
        );
        registry
    }

    /// Consume the first triggered shortcut this frame and return its action.
    pub fn consume(&self, ctx: &egui::Context) -> Option<&str> {
        ctx.input_mut(|input| {
            self.bindings
                .iter()
                .find(|(shortcut, _)| input.consume_shortcut(shortcut))
                .map(|(_, action)| action.as_str())
        })
    }

    /// Shortcut bound to `action`
    pub fn shortcut_for(&self, action: &str) -> Option<&KeyboardShortcut> {
        self.bindings
            .iter()
            .find(|(_, a)| a == action)
            .map(|(shortcut, _)| shortcut)
    }

    /// Tooltip for a control: `label (shortcut)` when `action` is bound,
    /// otherwise just `label`.
    pub fn hover_text(&self, label: &str, action: &str) -> String {
        match self.shortcut_for(action) {
            Some(shortcut) => {
                let keys = shortcut.format(&egui::ModifierNames::NAMES, cfg!(target_os = "macos"));
                format!("{label} ({keys})")
            }
            None => label.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
