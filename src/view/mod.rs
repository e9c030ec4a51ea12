//! The buffer view: the editing surface for the active buffer and the
//! run, save, clear and format actions that operate on it.
//!
//! ## Module layout
//!
//! - [`surface`]: `EditSurface` and the `ViewLink` shared with the registry.
//! - [`ui`]: egui rendering of the surface.

mod surface;
mod ui;

pub use surface::{
    EMPTY_STATE_MESSAGE, EditSurface, OUTPUT_PLACEHOLDER, ViewLink, placeholder_hint,
};
pub use ui::status_color;

use crate::clear_confirmation_ui::{ClearConfirmAction, ClearConfirmationUI};
use crate::save::{FileSink, SaveError, sink_from_config};
use crate::session::{BufferId, SessionRegistry, sanitize_name};
use chatpad_config::Config;
use chatpad_exec::{
    HttpExecutor, JsEvaluator, Language, RemoteRunner, RunReport, format_javascript,
};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

/// Spaces inserted by the Tab key
pub const INDENT: &str = "    ";

/// Result of a remote run, stamped with the surface that started it
struct RemoteOutcome {
    buffer_id: BufferId,
    generation: u64,
    report: RunReport,
}

/// Replace the character range `start..end` of `text` with [`INDENT`].
///
/// Indices are in characters, as egui cursors are. Returns the new text and
/// the cursor position just after the inserted spaces.
pub fn indent_selection(text: &str, start: usize, end: usize) -> (String, usize) {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let byte_at = |index: usize| {
        text.char_indices()
            .nth(index)
            .map_or(text.len(), |(offset, _)| offset)
    };
    let (start_byte, end_byte) = (byte_at(start), byte_at(end));

    let mut result = String::with_capacity(text.len() + INDENT.len());
    result.push_str(&text[..start_byte]);
    result.push_str(INDENT);
    result.push_str(&text[end_byte..]);

    let cursor = text[..start_byte].chars().count() + INDENT.chars().count();
    (result, cursor)
}

/// Controller for the editing surface.
pub struct BufferView {
    link: ViewLink,
    bound: bool,
    evaluator: JsEvaluator,
    remote: RemoteRunner,
    sink: Box<dyn FileSink>,
    clear_confirmation: ClearConfirmationUI,
    /// Surface the open clear dialog was raised for
    clear_target: Option<(BufferId, u64)>,
    font_size: f32,
    next_generation: u64,
    remote_tx: Sender<RemoteOutcome>,
    remote_rx: Receiver<RemoteOutcome>,
    remote_in_flight: usize,
}

impl BufferView {
    pub fn new(evaluator: JsEvaluator, remote: RemoteRunner, sink: Box<dyn FileSink>) -> Self {
        let (remote_tx, remote_rx) = mpsc::channel();
        Self {
            link: ViewLink::default(),
            bound: false,
            evaluator,
            remote,
            sink,
            clear_confirmation: ClearConfirmationUI::new(),
            clear_target: None,
            font_size: crate::ui_constants::DEFAULT_EDITOR_FONT_SIZE,
            next_generation: 0,
            remote_tx,
            remote_rx,
            remote_in_flight: 0,
        }
    }

    /// View wired to the HTTP executor and save location from `config`.
    pub fn from_config(config: &Config) -> Self {
        let execution = &config.execution;
        let executor = HttpExecutor::new(
            execution.endpoint.clone(),
            Duration::from_secs(execution.timeout_secs),
        );
        let remote = RemoteRunner::new(Arc::new(executor), &execution.endpoint);
        let evaluator = JsEvaluator::new(execution.max_loop_iterations);

        let mut view = Self::new(evaluator, remote, sink_from_config(&config.save));
        view.font_size = config.editor_font_size;
        view
    }

    /// View side of the handshake: give the registry its link, then render.
    pub fn bind_registry(&mut self, registry: &mut SessionRegistry) {
        if self.bound {
            log::warn!("Buffer view is already bound to a registry");
            return;
        }
        registry.attach_view(self.link.clone());
        self.bound = true;
        log::debug!("Buffer view bound to session registry");
        self.render(registry);
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// The link handed to the registry
    pub fn link(&self) -> &ViewLink {
        &self.link
    }

    /// Write the surface text and language through to the registry.
    pub fn flush_edits(&self, registry: &mut SessionRegistry) {
        if !self.bound {
            return;
        }
        registry.flush_active_edits();
    }

    /// Discard the surface and rebuild it from the active record.
    pub fn render(&mut self, registry: &SessionRegistry) {
        let surface = match registry.active_buffer() {
            Some(record) if !record.minimized => {
                self.next_generation += 1;
                Some(EditSurface::from_record(record, self.next_generation))
            }
            _ => None,
        };
        if let Some((buffer_id, _)) = self.clear_target.take() {
            log::debug!("Dropping pending clear for buffer {buffer_id} on re-render");
            self.clear_confirmation.hide();
        }
        self.link.replace_surface(surface);
    }

    /// Render if the registry asked for it since the last render.
    pub fn sync(&mut self, registry: &SessionRegistry) -> bool {
        if !self.link.render_requested() {
            return false;
        }
        self.render(registry);
        true
    }

    /// Copy of the live surface, `None` while the placeholder is shown.
    pub fn surface(&self) -> Option<EditSurface> {
        self.link.snapshot()
    }

    pub fn is_placeholder(&self) -> bool {
        self.surface().is_none()
    }

    /// Replace the surface text, as typing does.
    pub fn edit_text(&mut self, registry: &mut SessionRegistry, text: impl Into<String>) {
        let text = text.into();
        if self.link.with_surface(|s| s.text = text).is_some() {
            self.flush_edits(registry);
        }
    }

    /// Change the language selector.
    pub fn set_language(&mut self, registry: &mut SessionRegistry, language: Language) {
        if self.link.with_surface(|s| s.language = language).is_some() {
            self.flush_edits(registry);
        }
    }

    /// Tab key: replace the selection with four spaces. Returns the new cursor.
    pub fn insert_indent(
        &mut self,
        registry: &mut SessionRegistry,
        start: usize,
        end: usize,
    ) -> Option<usize> {
        let cursor = self.link.with_surface(|s| {
            let (text, cursor) = indent_selection(&s.text, start, end);
            s.text = text;
            cursor
        })?;
        self.flush_edits(registry);
        Some(cursor)
    }

    fn set_output(&self, report: RunReport) {
        self.link.with_surface(|s| s.output = report);
    }

    /// Run the surface text locally or remotely depending on its language.
    pub fn run(&mut self) {
        let Some((code, language, buffer_id, generation)) = self.link.with_surface(|s| {
            (
                s.text.trim().to_string(),
                s.language,
                s.buffer_id,
                s.generation,
            )
        }) else {
            return;
        };

        if code.is_empty() {
            self.set_output(RunReport::warning("Please enter some code first."));
            return;
        }

        let language = language.effective(&code);
        if language.runs_locally() {
            self.set_output(RunReport::info("Running code..."));
            let report = self.evaluator.run(&code);
            self.set_output(report);
        } else if language.runs_remotely() {
            self.spawn_remote_run(code, language, buffer_id, generation);
        } else {
            self.set_output(RunReport::warning(format!(
                "Language {language} is not supported yet."
            )));
        }
    }

    fn spawn_remote_run(
        &mut self,
        code: String,
        language: Language,
        buffer_id: BufferId,
        generation: u64,
    ) {
        self.set_output(RunReport::info(format!(
            "Executing {language} code on server..."
        )));

        let runner = self.remote.clone();
        let tx = self.remote_tx.clone();
        let spawned = std::thread::Builder::new()
            .name("chatpad-remote-run".to_string())
            .spawn(move || {
                let report = runner.run(&code, language);
                // Receiver is gone when the view was dropped mid-run
                let _ = tx.send(RemoteOutcome {
                    buffer_id,
                    generation,
                    report,
                });
            });

        match spawned {
            Ok(_) => self.remote_in_flight += 1,
            Err(e) => {
                log::error!("Failed to spawn remote run thread: {}", e);
                self.set_output(RunReport::error(format!(
                    "Failed to execute {language} code: {e}"
                )));
            }
        }
    }

    /// Apply finished remote runs. Returns `true` if the output changed.
    ///
    /// Results for a surface that has since been rebuilt are dropped.
    pub fn poll_remote(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.remote_rx.try_recv() {
            self.remote_in_flight = self.remote_in_flight.saturating_sub(1);

            let RemoteOutcome {
                buffer_id,
                generation,
                report,
            } = outcome;
            let applied = self
                .link
                .with_surface(|s| {
                    let current = s.buffer_id == buffer_id && s.generation == generation;
                    if current {
                        s.output = report;
                    }
                    current
                })
                .unwrap_or(false);

            if applied {
                changed = true;
            } else {
                log::debug!(
                    "Discarding stale remote result for buffer {} (generation {})",
                    buffer_id,
                    generation
                );
            }
        }
        changed
    }

    pub fn has_pending_runs(&self) -> bool {
        self.remote_in_flight > 0
    }

    /// Write the trimmed surface text through the file sink.
    pub fn save(&mut self, registry: &SessionRegistry) {
        let Some((code, language, buffer_id, surface_name)) = self.link.with_surface(|s| {
            (
                s.text.trim().to_string(),
                s.language,
                s.buffer_id,
                s.name.clone(),
            )
        }) else {
            return;
        };

        if code.is_empty() {
            self.set_output(RunReport::warning("No code to save."));
            return;
        }

        let name = registry
            .buffer(buffer_id)
            .map_or(surface_name, |record| record.name.clone());
        let stem = sanitize_name(&name);
        let stem = if stem.is_empty() { "untitled" } else { stem.as_str() };
        let extension = language.effective(&code).file_extension();
        let file_name = format!("{stem}.{extension}");

        let report = match self.sink.save(&file_name, &code) {
            Ok(_) => RunReport::success(format!("File saved as {file_name}")),
            Err(SaveError::Cancelled) => RunReport::info("Save cancelled."),
            Err(e) => RunReport::error(format!("Could not save {file_name}: {e}")),
        };
        self.set_output(report);
    }

    /// Ask for confirmation before clearing.
    pub fn request_clear(&mut self) {
        if let Some((name, buffer_id, generation)) = self
            .link
            .with_surface(|s| (s.name.clone(), s.buffer_id, s.generation))
        {
            self.clear_target = Some((buffer_id, generation));
            self.clear_confirmation.show_for(&name);
        }
    }

    pub fn is_clear_pending(&self) -> bool {
        self.clear_confirmation.is_visible()
    }

    /// Act on the answer from the confirmation dialog.
    pub fn resolve_clear(&mut self, action: ClearConfirmAction, registry: &mut SessionRegistry) {
        match action {
            ClearConfirmAction::Confirm => {
                self.clear_confirmation.hide();
                let Some(target) = self.clear_target.take() else {
                    return;
                };
                let live = self.link.with_surface(|s| (s.buffer_id, s.generation));
                if live == Some(target) {
                    self.apply_clear(registry);
                } else {
                    log::debug!(
                        "Ignoring clear confirmation for buffer {} (generation {})",
                        target.0,
                        target.1
                    );
                }
            }
            ClearConfirmAction::Cancel => {
                self.clear_confirmation.hide();
                self.clear_target = None;
            }
            ClearConfirmAction::None => {}
        }
    }

    /// Empty the surface, write it through and reset the output panel.
    fn apply_clear(&mut self, registry: &mut SessionRegistry) {
        let cleared = self.link.with_surface(|s| {
            s.text.clear();
            s.output = RunReport::neutral(OUTPUT_PLACEHOLDER);
            s.focus_requested = true;
        });
        if cleared.is_some() {
            self.flush_edits(registry);
        }
    }

    /// Reformat JavaScript in place; other languages are left untouched.
    pub fn format(&mut self, registry: &mut SessionRegistry) {
        let Some((text, language)) = self.link.with_surface(|s| (s.text.clone(), s.language))
        else {
            return;
        };

        let language = language.effective(&text);
        if language != Language::JavaScript {
            self.set_output(RunReport::info(format!(
                "Formatting for {language} is not supported yet."
            )));
            return;
        }

        let formatted = format_javascript(&text);
        self.link.with_surface(|s| {
            s.text = formatted;
            s.output = RunReport::success("Code formatted successfully!");
        });
        self.flush_edits(registry);
    }

    /// Draw dialogs owned by the view.
    pub fn show_dialogs(&mut self, ctx: &egui::Context, registry: &mut SessionRegistry) {
        let action = self.clear_confirmation.show(ctx);
        self.resolve_clear(action, registry);
    }
}
