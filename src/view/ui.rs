//! egui rendering of the buffer view.

use super::{BufferView, EMPTY_STATE_MESSAGE, indent_selection};
use crate::session::SessionRegistry;
use crate::ui_constants::{
    EDITOR_MAX_HEIGHT, EDITOR_ROWS, EMPTY_STATE_TOP_PADDING, OUTPUT_CORNER_RADIUS,
    OUTPUT_MAX_HEIGHT, OUTPUT_MIN_HEIGHT, OUTPUT_PADDING,
};
use chatpad_exec::{Language, OutputStatus};
use chatpad_keybindings::KeybindingRegistry;
use egui::Color32;
use egui::text::{CCursor, CCursorRange};

const NEUTRAL_COLOR: Color32 = Color32::from_rgb(0x00, 0x33, 0x66);
const INFO_COLOR: Color32 = Color32::from_rgb(0x3a, 0x6e, 0xa5);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x00, 0x66, 0x00);
const WARNING_COLOR: Color32 = Color32::from_rgb(0xcc, 0x66, 0x00);
const ERROR_COLOR: Color32 = Color32::from_rgb(0xcc, 0x00, 0x00);

const OUTPUT_BACKGROUND: Color32 = Color32::from_rgb(0xf7, 0xfb, 0xff);
const OUTPUT_BORDER: Color32 = Color32::from_rgb(0xb3, 0xd1, 0xf7);

/// Text colour for an output status
pub fn status_color(status: OutputStatus) -> Color32 {
    match status {
        OutputStatus::Neutral => NEUTRAL_COLOR,
        OutputStatus::Info => INFO_COLOR,
        OutputStatus::Success => SUCCESS_COLOR,
        OutputStatus::Warning => WARNING_COLOR,
        OutputStatus::Error => ERROR_COLOR,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SurfaceAction {
    Run,
    Save,
    Clear,
    Format,
}

impl BufferView {
    /// Draw the surface (or the placeholder) and dispatch button presses.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        registry: &mut SessionRegistry,
        keybindings: &KeybindingRegistry,
    ) {
        self.sync(registry);
        if self.poll_remote() {
            ui.ctx().request_repaint();
        }

        let Some(mut surface) = self.surface() else {
            ui.vertical_centered(|ui| {
                ui.add_space(EMPTY_STATE_TOP_PADDING);
                ui.label(
                    egui::RichText::new(EMPTY_STATE_MESSAGE)
                        .italics()
                        .color(INFO_COLOR),
                );
            });
            return;
        };

        let previous_language = surface.language;
        let mut action = None;

        ui.horizontal(|ui| {
            ui.strong(surface.header());
            ui.label("| Language:");
            egui::ComboBox::from_id_salt("language_selector")
                .selected_text(surface.language.display_name())
                .show_ui(ui, |ui| {
                    for language in Language::ALL {
                        ui.selectable_value(
                            &mut surface.language,
                            language,
                            language.display_name(),
                        );
                    }
                });
        });

        let editor_id = ui.make_persistent_id(("code_editor", surface.buffer_id));
        let mut text_changed = false;

        // Tab indents instead of moving focus
        let editor_focused = ui.memory(|m| m.has_focus(editor_id));
        if editor_focused
            && ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Tab))
        {
            let mut state = egui::TextEdit::load_state(ui.ctx(), editor_id).unwrap_or_default();
            let end = surface.text.chars().count();
            let (start, end) = state
                .cursor
                .char_range()
                .map_or((end, end), |r| (r.primary.index, r.secondary.index));

            let (text, cursor) = indent_selection(&surface.text, start, end);
            surface.text = text;
            state
                .cursor
                .set_char_range(Some(CCursorRange::one(CCursor::new(cursor))));
            state.store(ui.ctx(), editor_id);
            text_changed = true;
        }

        let hint = surface.placeholder_hint();
        let response = egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .max_height(EDITOR_MAX_HEIGHT)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut surface.text)
                        .id(editor_id)
                        .code_editor()
                        .font(egui::FontId::monospace(self.font_size))
                        .hint_text(hint)
                        .desired_rows(EDITOR_ROWS)
                        .desired_width(f32::INFINITY)
                        .lock_focus(true),
                )
            })
            .inner;
        text_changed |= response.changed();

        if surface.focus_requested {
            response.request_focus();
            surface.focus_requested = false;
        }

        ui.horizontal(|ui| {
            if ui
                .button("Run Code")
                .on_hover_text(keybindings.hover_text("Run code", "run_code"))
                .clicked()
            {
                action = Some(SurfaceAction::Run);
            }
            if ui
                .button("Save File")
                .on_hover_text(keybindings.hover_text("Save file", "save_file"))
                .clicked()
            {
                action = Some(SurfaceAction::Save);
            }
            if ui.button("Clear").on_hover_text("Clear code").clicked() {
                action = Some(SurfaceAction::Clear);
            }
            if ui.button("Format").on_hover_text("Format code").clicked() {
                action = Some(SurfaceAction::Format);
            }
        });

        ui.add_space(8.0);
        egui::Frame::new()
            .fill(OUTPUT_BACKGROUND)
            .stroke(egui::Stroke::new(1.0, OUTPUT_BORDER))
            .corner_radius(OUTPUT_CORNER_RADIUS)
            .inner_margin(egui::Margin::same(OUTPUT_PADDING))
            .show(ui, |ui| {
                ui.set_min_height(OUTPUT_MIN_HEIGHT);
                ui.set_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .id_salt("output_scroll")
                    .max_height(OUTPUT_MAX_HEIGHT)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&surface.output.text)
                                .monospace()
                                .color(status_color(surface.output.status)),
                        );
                    });
            });

        let language_changed = surface.language != previous_language;
        let focus_requested = surface.focus_requested;
        let (text, language) = (surface.text, surface.language);
        self.link.with_surface(|live| {
            live.text = text;
            live.language = language;
            live.focus_requested = focus_requested;
        });
        if text_changed || language_changed {
            self.flush_edits(registry);
        }

        match action {
            Some(SurfaceAction::Run) => self.run(),
            Some(SurfaceAction::Save) => self.save(registry),
            Some(SurfaceAction::Clear) => self.request_clear(),
            Some(SurfaceAction::Format) => self.format(registry),
            None => {}
        }
    }
}
