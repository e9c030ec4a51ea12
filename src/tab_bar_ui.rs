//! Tab bar UI using egui
//!
//! One tab per buffer in creation order, each with a close control, and a
//! trailing `+` for a new buffer.

use crate::session::{BufferId, BufferRecord, SessionRegistry};
use crate::ui_constants::{TAB_LABEL_MAX_WIDTH, TAB_SPACING};
use chatpad_keybindings::KeybindingRegistry;

/// Marker drawn after the name of an untitled buffer holding text
pub const MODIFIED_MARKER: &str = "●";

const MODIFIED_COLOR: egui::Color32 = egui::Color32::from_rgb(0xff, 0x6b, 0x35);

/// Actions that can be triggered from the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabBarAction {
    /// No action
    None,
    /// Switch to a specific buffer
    SwitchTo(BufferId),
    /// Close a specific buffer
    Close(BufferId),
    /// Create a new buffer
    NewTab,
}

/// Tab bar renderer
#[derive(Debug, Default)]
pub struct TabBarUI;

/// Label text for a buffer's tab
pub fn tab_label(record: &BufferRecord) -> String {
    if record.is_modified_untitled() {
        format!("{} {}", record.name, MODIFIED_MARKER)
    } else {
        record.name.clone()
    }
}

impl TabBarUI {
    pub fn new() -> Self {
        Self
    }

    /// Render the tab bar and return any action triggered
    pub fn render(
        &self,
        ui: &mut egui::Ui,
        registry: &SessionRegistry,
        keybindings: &KeybindingRegistry,
    ) -> TabBarAction {
        let mut action = TabBarAction::None;
        let active = registry.active_id();

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = TAB_SPACING;

            for record in registry.buffers() {
                let is_active = active == Some(record.id);
                let mut label = egui::RichText::new(&record.name);
                if is_active {
                    label = label.strong();
                }

                ui.scope(|ui| {
                    ui.set_max_width(TAB_LABEL_MAX_WIDTH);
                    let tab = ui
                        .selectable_label(is_active, label)
                        .on_hover_text(tab_label(record));
                    if tab.clicked_by(egui::PointerButton::Primary) {
                        action = TabBarAction::SwitchTo(record.id);
                    }
                });

                if record.is_modified_untitled() {
                    ui.label(egui::RichText::new(MODIFIED_MARKER).color(MODIFIED_COLOR));
                }

                if ui
                    .small_button("×")
                    .on_hover_text("Close tab")
                    .clicked_by(egui::PointerButton::Primary)
                {
                    action = TabBarAction::Close(record.id);
                }
                ui.separator();
            }

            if ui
                .button("+")
                .on_hover_text(keybindings.hover_text("New tab", "new_tab"))
                .clicked_by(egui::PointerButton::Primary)
            {
                action = TabBarAction::NewTab;
            }
        });

        action
    }

    /// Apply a tab bar action to the registry
    pub fn apply(action: TabBarAction, registry: &mut SessionRegistry) {
        match action {
            TabBarAction::None => {}
            TabBarAction::SwitchTo(id) => {
                registry.switch_to(id);
            }
            TabBarAction::Close(id) => registry.close(id),
            TabBarAction::NewTab => {
                registry.create_buffer(None);
            }
        }
    }
}
