//! Core `Config` struct definition.
//!
//! Fields are grouped into sub-structs where a section has more than one
//! setting; every field carries a serde default so that partial YAML files
//! load cleanly.

use crate::types::{KeyBinding, LogLevel, SaveLocation};
use serde::{Deserialize, Serialize};

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Title shown in the window chrome
    #[serde(default = "crate::defaults::window_title")]
    pub window_title: String,

    /// Initial window width in logical pixels
    #[serde(default = "crate::defaults::window_width")]
    pub window_width: f32,

    /// Initial window height in logical pixels
    #[serde(default = "crate::defaults::window_height")]
    pub window_height: f32,

    /// Monospace font size of the editing surface and output panel
    #[serde(default = "crate::defaults::editor_font_size")]
    pub editor_font_size: f32,

    /// Debug log verbosity
    #[serde(default)]
    pub log_level: LogLevel,

    /// Code execution settings
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Buffer save settings
    #[serde(default)]
    pub save: SaveConfig,

    /// Keyboard shortcuts
    #[serde(default = "crate::defaults::keybindings")]
    pub keybindings: Vec<KeyBinding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: crate::defaults::window_title(),
            window_width: crate::defaults::window_width(),
            window_height: crate::defaults::window_height(),
            editor_font_size: crate::defaults::editor_font_size(),
            log_level: LogLevel::default(),
            execution: ExecutionConfig::default(),
            save: SaveConfig::default(),
            keybindings: crate::defaults::keybindings(),
        }
    }
}

/// Settings for running snippets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// URL of the remote execution service used for Python, Java and PHP
    #[serde(default = "crate::defaults::execution_endpoint")]
    pub endpoint: String,

    /// Timeout for a single remote execution request
    #[serde(default = "crate::defaults::execution_timeout_secs")]
    pub timeout_secs: u64,

    /// Loop iteration ceiling for in-process JavaScript evaluation
    #[serde(default = "crate::defaults::max_loop_iterations")]
    pub max_loop_iterations: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::defaults::execution_endpoint(),
            timeout_secs: crate::defaults::execution_timeout_secs(),
            max_loop_iterations: crate::defaults::max_loop_iterations(),
        }
    }
}

/// Settings for writing buffers to disk
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Directory used when no dialog is shown
    #[serde(default)]
    pub location: SaveLocation,

    /// Show a native save dialog instead of writing straight to `location`
    #[serde(default = "crate::defaults::bool_false")]
    pub ask_before_saving: bool,
}
