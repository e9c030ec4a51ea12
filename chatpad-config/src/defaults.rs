//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field, and by the `Default` impls.

use crate::types::KeyBinding;

pub fn window_title() -> String {
    "Chatpad".to_string()
}

pub fn window_width() -> f32 {
    760.0
}

pub fn window_height() -> f32 {
    620.0
}

pub fn editor_font_size() -> f32 {
    14.0
}

/// The backend service the original web page talked to on port 3001.
pub fn execution_endpoint() -> String {
    "http://localhost:3001/api/execute".to_string()
}

pub fn execution_timeout_secs() -> u64 {
    30
}

pub fn max_loop_iterations() -> u64 {
    1_000_000
}

pub fn bool_false() -> bool {
    false
}

pub fn keybindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("CmdOrCtrl+Enter", "run_code"),
        KeyBinding::new("CmdOrCtrl+S", "save_file"),
        KeyBinding::new("CmdOrCtrl+T", "new_tab"),
        KeyBinding::new("CmdOrCtrl+W", "close_tab"),
        KeyBinding::new("Ctrl+Tab", "next_tab"),
    ]
}
