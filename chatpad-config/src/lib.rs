//! Configuration system for the chatpad snippet editor.
//!
//! This crate provides configuration loading, saving, and default values
//! for the editor. It includes:
//!
//! - Window and editor appearance settings
//! - Remote execution endpoint and local evaluation limits
//! - Save location for buffers written to disk
//! - Keyboard shortcut bindings

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{Config, ExecutionConfig, SaveConfig};
pub use error::ConfigError;
pub use types::{KeyBinding, LogLevel, SaveLocation};
