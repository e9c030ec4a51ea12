use super::{BufferId, BufferRecord, BufferUpdate, derive_name, is_untitled_name, untitled_name};
use crate::view::ViewLink;
use chatpad_exec::Language;

/// Ordered buffer list plus the active pointer.
///
/// The registry never owns the view. It holds a [`ViewLink`] handed over by
/// [`crate::view::BufferView::bind_registry`] and uses it to pull pending
/// edits out of the live surface and to ask for a re-render.
pub struct SessionRegistry {
    buffers: Vec<BufferRecord>,
    active_id: Option<BufferId>,
    next_id: BufferId,
    window_visible: bool,
    view: Option<ViewLink>,
    /// Bumped whenever the tab strip content changes
    tab_strip_generation: u64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// One record, `Untitled-1`, active, with the window shown.
    pub fn new() -> Self {
        Self {
            buffers: vec![BufferRecord::untitled(1)],
            active_id: Some(1),
            next_id: 2,
            window_visible: true,
            view: None,
            tab_strip_generation: 0,
        }
    }

    /// Registry side of the view handshake. A second link replaces the first.
    pub fn attach_view(&mut self, link: ViewLink) {
        if self.view.is_some() {
            log::warn!("Session registry already had a view attached, replacing it");
        }
        self.view = Some(link);
    }

    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    /// Copy unsaved surface edits into their record.
    pub fn flush_active_edits(&mut self) {
        let pending = self.view.as_ref().and_then(ViewLink::pending_edits);
        if let Some((id, update)) = pending {
            self.update(id, update);
        }
    }

    fn render_tab_strip(&mut self) {
        self.tab_strip_generation = self.tab_strip_generation.wrapping_add(1);
    }

    fn render_view(&self) {
        if let Some(view) = &self.view {
            view.request_render();
        }
    }

    fn render_all(&mut self) {
        self.render_tab_strip();
        self.render_view();
    }

    /// Append a fresh buffer and make it active. Returns its id.
    pub fn create_buffer(&mut self, name: Option<&str>) -> BufferId {
        self.flush_active_edits();

        let id = self.next_id;
        self.next_id += 1;

        let mut record = BufferRecord::untitled(id);
        if let Some(name) = name {
            record.name = name.to_string();
        }
        log::info!("Created buffer {} ({})", id, record.name);

        self.buffers.push(record);
        self.active_id = Some(id);
        self.render_all();
        id
    }

    /// Make `id` the active buffer.
    ///
    /// Returns `false` without touching anything when `id` is unknown.
    pub fn switch_to(&mut self, id: BufferId) -> bool {
        if self.active_id == Some(id) {
            return true;
        }
        if self.buffer(id).is_none() {
            log::warn!("Ignoring switch to unknown buffer {}", id);
            return false;
        }

        self.flush_active_edits();
        self.active_id = Some(id);
        log::debug!("Switched to buffer {}", id);
        self.render_all();
        true
    }

    /// Switch to the buffer after the active one, wrapping around.
    pub fn next_tab(&mut self) {
        let Some(current) = self.active_index() else {
            return;
        };
        let next = self.buffers[(current + 1) % self.buffers.len()].id;
        self.switch_to(next);
    }

    /// Close buffer `id`.
    ///
    /// The last remaining buffer is reset to a blank `Untitled-1` instead of
    /// being removed.
    pub fn close(&mut self, id: BufferId) {
        let Some(index) = self.buffers.iter().position(|b| b.id == id) else {
            log::debug!("Ignoring close of unknown buffer {}", id);
            return;
        };

        self.flush_active_edits();

        if self.buffers.len() == 1 {
            let record = &mut self.buffers[0];
            record.content.clear();
            record.name = untitled_name(1);
            record.language = Language::Auto;
            record.minimized = false;
            log::info!("Reset sole buffer {}", id);
            self.render_all();
            return;
        }

        self.buffers.remove(index);
        log::info!("Closed buffer {}", id);

        if self.active_id == Some(id) {
            self.active_id = self.buffers.first().map(|b| b.id);
        }

        if self.buffers.is_empty() {
            self.hide_window();
        } else {
            self.render_all();
        }
    }

    /// Merge `update` into buffer `id`. Returns `false` if there is no such buffer.
    ///
    /// New non-blank content renames a still-untitled buffer after its first
    /// line; only the tab strip is re-rendered in that case.
    pub fn update(&mut self, id: BufferId, update: BufferUpdate) -> bool {
        let Some(record) = self.buffers.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        let BufferUpdate {
            content,
            language,
            minimized,
            name,
        } = update;

        if let Some(name) = name {
            record.name = name;
        }
        if let Some(language) = language {
            record.language = language;
        }
        if let Some(minimized) = minimized {
            record.minimized = minimized;
        }

        let mut renamed = false;
        if let Some(content) = content {
            if is_untitled_name(&record.name)
                && let Some(name) = derive_name(&content)
            {
                log::debug!("Renaming buffer {} from {} to {}", id, record.name, name);
                record.name = name;
                renamed = true;
            }
            record.content = content;
        }

        if renamed {
            self.render_tab_strip();
        }
        true
    }

    /// Collapse the active buffer's surface into the placeholder.
    pub fn minimize(&mut self) {
        let Some(id) = self.active_id else {
            return;
        };
        self.flush_active_edits();
        if let Some(record) = self.buffer_mut(id) {
            record.minimized = true;
            self.render_view();
        }
    }

    /// Restore the active buffer's surface.
    pub fn maximize(&mut self) {
        let Some(id) = self.active_id else {
            return;
        };
        if let Some(record) = self.buffer_mut(id) {
            record.minimized = false;
            self.render_view();
        }
    }

    /// The "start coding" affordance shown while the window is hidden.
    pub fn start(&mut self) -> BufferId {
        let id = self.create_buffer(None);
        self.show_window();
        id
    }

    /// Flush, drop every buffer and hide the window.
    pub fn close_window(&mut self) {
        self.flush_active_edits();
        let count = self.buffers.len();
        self.buffers.clear();
        self.active_id = None;
        log::info!("Closed window with {} buffer(s)", count);
        self.render_view();
        self.hide_window();
    }

    fn show_window(&mut self) {
        self.window_visible = true;
        self.render_all();
    }

    fn hide_window(&mut self) {
        self.window_visible = false;
        self.render_tab_strip();
    }

    fn active_index(&self) -> Option<usize> {
        let active = self.active_id?;
        self.buffers.iter().position(|b| b.id == active)
    }

    fn buffer_mut(&mut self, id: BufferId) -> Option<&mut BufferRecord> {
        self.buffers.iter_mut().find(|b| b.id == id)
    }

    pub fn active_buffer(&self) -> Option<&BufferRecord> {
        self.active_index().map(|i| &self.buffers[i])
    }

    pub fn active_id(&self) -> Option<BufferId> {
        self.active_id
    }

    pub fn buffer(&self, id: BufferId) -> Option<&BufferRecord> {
        self.buffers.iter().find(|b| b.id == id)
    }

    /// All buffers in creation order
    pub fn buffers(&self) -> &[BufferRecord] {
        &self.buffers
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn is_window_visible(&self) -> bool {
        self.window_visible
    }

    pub fn next_id(&self) -> BufferId {
        self.next_id
    }

    pub fn tab_strip_generation(&self) -> u64 {
        self.tab_strip_generation
    }
}
