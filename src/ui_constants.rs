//! Named constants for UI layout dimensions.
//!
//! Only UI layout constants (dimensions, sizes, spacing) belong here.
//! Status colours live next to the output panel in `view::ui`.

// ---------------------------------------------------------------------------
// Buffer view  (src/view/ui.rs)
// ---------------------------------------------------------------------------

/// Monospace font size used until the config says otherwise.
pub const DEFAULT_EDITOR_FONT_SIZE: f32 = 14.0;
/// Visible rows of the code editor before it scrolls.
pub const EDITOR_ROWS: usize = 14;
/// Maximum height of the editor scroll area.
pub const EDITOR_MAX_HEIGHT: f32 = 360.0;
/// Minimum height of the output panel.
pub const OUTPUT_MIN_HEIGHT: f32 = 60.0;
/// Maximum height of the output panel before it scrolls.
pub const OUTPUT_MAX_HEIGHT: f32 = 150.0;
/// Inner padding of the output panel.
pub const OUTPUT_PADDING: i8 = 12;
/// Corner radius of the output panel.
pub const OUTPUT_CORNER_RADIUS: f32 = 6.0;
/// Gap above the placeholder message.
pub const EMPTY_STATE_TOP_PADDING: f32 = 40.0;

// ---------------------------------------------------------------------------
// Tab bar  (src/tab_bar_ui.rs)
// ---------------------------------------------------------------------------

/// Horizontal spacing between tabs.
pub const TAB_SPACING: f32 = 4.0;
/// Maximum rendered width of a tab label before it is elided.
pub const TAB_LABEL_MAX_WIDTH: f32 = 160.0;

// ---------------------------------------------------------------------------
// Window chrome  (src/app.rs)
// ---------------------------------------------------------------------------

/// Size of the start button shown while the window is hidden.
pub const START_BUTTON_SIZE: [f32; 2] = [180.0, 40.0];
/// Repaint interval while a remote run is outstanding, in milliseconds.
pub const REMOTE_POLL_INTERVAL_MS: u64 = 100;
