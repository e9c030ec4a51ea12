//! Confirmation dialog for the Clear action.
//!
//! Clearing wipes every line of the active buffer, so the view asks first.
//! Escape or Cancel dismisses the dialog without touching anything.

/// Action returned by the clear confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearConfirmAction {
    /// User confirmed - clear the buffer
    Confirm,
    /// User cancelled - keep the content
    Cancel,
    /// No action yet (dialog still showing or hidden)
    None,
}

/// State for the clear confirmation dialog
#[derive(Debug, Default)]
pub struct ClearConfirmationUI {
    visible: bool,
    /// Buffer name for display
    buffer_name: String,
}

impl ClearConfirmationUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the dialog for the named buffer
    pub fn show_for(&mut self, buffer_name: &str) {
        self.visible = true;
        self.buffer_name = buffer_name.to_string();
    }

    /// Hide the dialog and clear state
    pub fn hide(&mut self) {
        self.visible = false;
        self.buffer_name.clear();
    }

    /// Render the dialog and return any action
    pub fn show(&mut self, ctx: &egui::Context) -> ClearConfirmAction {
        if !self.visible {
            return ClearConfirmAction::None;
        }

        let mut action = ClearConfirmAction::None;

        egui::Window::new("Clear Code?")
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.label("Are you sure you want to clear all code in this tab?");
                    ui.add_space(5.0);
                    ui.label(
                        egui::RichText::new(&self.buffer_name)
                            .color(egui::Color32::GRAY)
                            .monospace(),
                    );
                    ui.add_space(15.0);

                    ui.horizontal(|ui| {
                        let clear_button = egui::Button::new(
                            egui::RichText::new("Clear").color(egui::Color32::WHITE),
                        )
                        .fill(egui::Color32::from_rgb(180, 50, 50));

                        if ui.add(clear_button).clicked() {
                            action = ClearConfirmAction::Confirm;
                        }

                        ui.add_space(10.0);

                        if ui.button("Cancel").clicked() {
                            action = ClearConfirmAction::Cancel;
                        }
                    });
                    ui.add_space(10.0);
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = ClearConfirmAction::Cancel;
        }

        if action != ClearConfirmAction::None {
            self.hide();
        }

        action
    }
}
