//! The live editing surface and the link the registry holds onto it.

use crate::session::{BufferId, BufferRecord, BufferUpdate};
use chatpad_exec::{Language, RunReport};
use std::cell::RefCell;
use std::rc::Rc;

/// Text shown in the output panel before anything has run
pub const OUTPUT_PLACEHOLDER: &str = "Output will appear here...";

/// Shown instead of a surface when nothing is active or the buffer is minimized
pub const EMPTY_STATE_MESSAGE: &str = "Select a tab to start coding or create a new one";

/// Editing state for the active buffer, rebuilt on every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSurface {
    pub buffer_id: BufferId,
    /// Buffer name at render time, shown in the header
    pub name: String,
    pub text: String,
    pub language: Language,
    pub output: RunReport,
    /// Distinguishes this surface from earlier ones for the same buffer
    pub generation: u64,
    pub(crate) focus_requested: bool,
}

impl EditSurface {
    pub(crate) fn from_record(record: &BufferRecord, generation: u64) -> Self {
        Self {
            buffer_id: record.id,
            name: record.name.clone(),
            text: record.content.clone(),
            language: record.language,
            output: RunReport::neutral(OUTPUT_PLACEHOLDER),
            generation,
            focus_requested: true,
        }
    }

    /// Title line above the editor
    pub fn header(&self) -> String {
        format!("Code Editor - {}", self.name)
    }

    /// Hint shown in the empty editor for the selected language
    pub fn placeholder_hint(&self) -> String {
        placeholder_hint(self.language)
    }
}

pub fn placeholder_hint(language: Language) -> String {
    match language {
        Language::Auto => "Enter your code here...".to_string(),
        other => format!("Enter your {other} code here..."),
    }
}

#[derive(Debug, Default)]
struct LinkState {
    surface: Option<EditSurface>,
    render_requested: bool,
}

/// Shared handle onto the view's live surface.
///
/// The view keeps one end and gives a clone to the registry, which uses it to
/// read pending edits and to request renders. A surface with a pending render
/// request no longer reflects the registry and yields no edits.
#[derive(Debug, Clone, Default)]
pub struct ViewLink {
    state: Rc<RefCell<LinkState>>,
}

impl ViewLink {
    pub fn request_render(&self) {
        self.state.borrow_mut().render_requested = true;
    }

    pub fn render_requested(&self) -> bool {
        self.state.borrow().render_requested
    }

    /// Surface text and language as an update for the surface's buffer.
    pub fn pending_edits(&self) -> Option<(BufferId, BufferUpdate)> {
        let state = self.state.borrow();
        if state.render_requested {
            return None;
        }
        state.surface.as_ref().map(|surface| {
            (
                surface.buffer_id,
                BufferUpdate::content(surface.text.clone()).with_language(surface.language),
            )
        })
    }

    pub(crate) fn replace_surface(&self, surface: Option<EditSurface>) {
        let mut state = self.state.borrow_mut();
        state.surface = surface;
        state.render_requested = false;
    }

    pub(crate) fn with_surface<R>(&self, f: impl FnOnce(&mut EditSurface) -> R) -> Option<R> {
        self.state.borrow_mut().surface.as_mut().map(f)
    }

    pub(crate) fn snapshot(&self) -> Option<EditSurface> {
        self.state.borrow().surface.clone()
    }
}
