// Library exports for testing and potential library use
//
// The two controllers, `session::SessionRegistry` and `view::BufferView`,
// only meet in `app::ChatpadApp`, which binds them once both exist.

pub mod app;
pub mod clear_confirmation_ui;
pub mod cli;
pub mod debug;
pub mod save;
pub mod session;
pub mod tab_bar_ui;
pub mod ui_constants;
pub mod view;

pub use chatpad_config as config;
pub use chatpad_exec as exec;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
