//! Editor configuration management.
//!
//! # Sub-modules
//!
//! - [`config_struct`]: Core `Config` struct and its sub-structs
//! - [`keybindings_methods`]: merging default keybindings into user config
//! - [`persistence`]: load/save and path resolution
//! - [`validation`]: semantic checks on loaded values

pub mod config_struct;
pub mod keybindings_methods;
pub mod persistence;
pub mod validation;

pub use config_struct::{Config, ExecutionConfig, SaveConfig};
