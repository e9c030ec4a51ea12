//! Application composition root.
//!
//! `ChatpadApp` owns exactly one [`SessionRegistry`] and one [`BufferView`]
//! and wires them together in two phases: construct both, then bind. It
//! implements [`eframe::App`] and routes shortcuts, window chrome and tab bar
//! clicks to the two controllers.

use crate::session::SessionRegistry;
use crate::tab_bar_ui::{TabBarAction, TabBarUI};
use crate::ui_constants::{REMOTE_POLL_INTERVAL_MS, START_BUTTON_SIZE};
use crate::view::BufferView;
use chatpad_config::Config;
use chatpad_keybindings::KeybindingRegistry;
use std::time::Duration;

/// Actions reachable from keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    RunCode,
    SaveFile,
    NewTab,
    CloseTab,
    NextTab,
}

impl AppAction {
    /// Parse a config action name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "run_code" => Some(Self::RunCode),
            "save_file" => Some(Self::SaveFile),
            "new_tab" => Some(Self::NewTab),
            "close_tab" => Some(Self::CloseTab),
            "next_tab" => Some(Self::NextTab),
            _ => None,
        }
    }
}

/// Actions from the window title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChromeAction {
    Minimize,
    Maximize,
    Close,
}

pub struct ChatpadApp {
    config: Config,
    registry: SessionRegistry,
    view: BufferView,
    tab_bar: TabBarUI,
    keybindings: KeybindingRegistry,
}

impl ChatpadApp {
    /// Build the app from its controllers and bind them.
    pub fn from_parts(config: Config, registry: SessionRegistry, view: BufferView) -> Self {
        let mut app = Self {
            keybindings: KeybindingRegistry::from_config(&config.keybindings),
            config,
            registry,
            view,
            tab_bar: TabBarUI::new(),
        };
        app.view.bind_registry(&mut app.registry);
        log::info!(
            "Chatpad ready with {} buffer(s), {} keybindings",
            app.registry.len(),
            app.keybindings.len()
        );
        app
    }

    /// Build the app for `config` with the HTTP executor and configured save sink.
    pub fn new(config: Config) -> Self {
        let view = BufferView::from_config(&config);
        Self::from_parts(config, SessionRegistry::new(), view)
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn view(&self) -> &BufferView {
        &self.view
    }

    /// Mutable access to both controllers at once
    pub fn controllers_mut(&mut self) -> (&mut SessionRegistry, &mut BufferView) {
        (&mut self.registry, &mut self.view)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Perform a shortcut action.
    pub fn handle_action(&mut self, action: AppAction) {
        log::debug!("Shortcut action {:?}", action);
        match action {
            AppAction::RunCode => self.view.run(),
            AppAction::SaveFile => self.view.save(&self.registry),
            AppAction::NewTab => {
                self.registry.create_buffer(None);
            }
            AppAction::CloseTab => {
                if let Some(id) = self.registry.active_id() {
                    self.registry.close(id);
                }
            }
            AppAction::NextTab => self.registry.next_tab(),
        }
        self.view.sync(&self.registry);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Dialogs own the keyboard while open
        if self.view.is_clear_pending() {
            return;
        }
        let Some(name) = self.keybindings.consume(ctx).map(str::to_string) else {
            return;
        };
        match AppAction::from_name(&name) {
            Some(action) => self.handle_action(action),
            None => log::warn!("Unknown keybinding action '{}'", name),
        }
    }

    fn chrome(&self, ui: &mut egui::Ui) -> Option<ChromeAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            ui.strong(&self.config.window_title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("×").on_hover_text("Close").clicked() {
                    action = Some(ChromeAction::Close);
                }
                if ui.small_button("□").on_hover_text("Maximize").clicked() {
                    action = Some(ChromeAction::Maximize);
                }
                if ui.small_button("_").on_hover_text("Minimize").clicked() {
                    action = Some(ChromeAction::Minimize);
                }
            });
        });
        action
    }

    /// Draw one frame.
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.handle_shortcuts(ctx);

        if !self.registry.is_window_visible() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    if ui
                        .add_sized(START_BUTTON_SIZE, egui::Button::new("Start coding"))
                        .clicked()
                    {
                        self.registry.start();
                    }
                });
            });
            self.view.sync(&self.registry);
            return;
        }

        let mut chrome_action = None;
        let mut tab_action = TabBarAction::None;
        egui::TopBottomPanel::top("chatpad_chrome").show(ctx, |ui| {
            chrome_action = self.chrome(ui);
            ui.separator();
            tab_action = self.tab_bar.render(ui, &self.registry, &self.keybindings);
        });

        match chrome_action {
            Some(ChromeAction::Minimize) => self.registry.minimize(),
            Some(ChromeAction::Maximize) => self.registry.maximize(),
            Some(ChromeAction::Close) => self.registry.close_window(),
            None => {}
        }
        TabBarUI::apply(tab_action, &mut self.registry);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.ui(ui, &mut self.registry, &self.keybindings);
        });
        self.view.show_dialogs(ctx, &mut self.registry);

        if self.view.has_pending_runs() {
            ctx.request_repaint_after(Duration::from_millis(REMOTE_POLL_INTERVAL_MS));
        }
    }
}

impl eframe::App for ChatpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

impl Drop for ChatpadApp {
    fn drop(&mut self) {
        // Keep whatever was typed since the last edit event
        self.view.flush_edits(&mut self.registry);
        log::info!("Chatpad shutting down with {} buffer(s)", self.registry.len());
    }
}
