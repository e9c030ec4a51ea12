//! Buffer records and the registry that owns them.
//!
//! A buffer is one tab: its name, text, selected language and minimized flag.
//! The [`SessionRegistry`] keeps them in creation order and tracks which one
//! is active.

mod registry;

pub use registry::SessionRegistry;

use chatpad_exec::Language;
use regex::Regex;
use std::sync::OnceLock;

/// Identifier of a buffer. Monotonic, never reused within a session.
pub type BufferId = u64;

/// Names longer than this are cut and suffixed with `...`
pub const MAX_DERIVED_NAME_CHARS: usize = 20;

/// First lines at least this long never rename an untitled buffer
pub const MAX_RENAME_SOURCE_CHARS: usize = 30;

/// One tab's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferRecord {
    pub id: BufferId,
    pub name: String,
    pub content: String,
    pub language: Language,
    pub minimized: bool,
}

impl BufferRecord {
    /// A blank record named `Untitled-<id>`
    pub fn untitled(id: BufferId) -> Self {
        Self {
            id,
            name: untitled_name(id),
            content: String::new(),
            language: Language::Auto,
            minimized: false,
        }
    }

    /// Whether the tab strip should flag the buffer as holding unnamed work
    pub fn is_modified_untitled(&self) -> bool {
        !self.content.trim().is_empty() && is_untitled_name(&self.name)
    }
}

/// Partial update merged into a [`BufferRecord`]. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferUpdate {
    pub content: Option<String>,
    pub language: Option<Language>,
    pub minimized: Option<bool>,
    pub name: Option<String>,
}

impl BufferUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_minimized(mut self, minimized: bool) -> Self {
        self.minimized = Some(minimized);
        self
    }
}

static UNTITLED_REGEX: OnceLock<Regex> = OnceLock::new();
static UNSAFE_NAME_CHARS_REGEX: OnceLock<Regex> = OnceLock::new();

fn untitled_regex() -> &'static Regex {
    UNTITLED_REGEX
        .get_or_init(|| Regex::new(r"^Untitled-\d+$").expect("Failed to compile untitled regex"))
}

fn unsafe_name_chars_regex() -> &'static Regex {
    // ASCII word characters, whitespace, dot and dash survive
    UNSAFE_NAME_CHARS_REGEX.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_\s.\-]").expect("Failed to compile name sanitizer regex")
    })
}

pub fn untitled_name(id: BufferId) -> String {
    format!("Untitled-{id}")
}

pub fn is_untitled_name(name: &str) -> bool {
    untitled_regex().is_match(name)
}

/// Strip every character outside `[A-Za-z0-9_\s.-]`.
pub fn sanitize_name(name: &str) -> String {
    unsafe_name_chars_regex().replace_all(name, "").into_owned()
}

/// Tab name derived from the first line of `content`, if it qualifies.
///
/// Returns `None` for blank content, for a first line of
/// [`MAX_RENAME_SOURCE_CHARS`] characters or more, and when nothing is left
/// after sanitizing.
pub fn derive_name(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        return None;
    }

    let first_line = content.split('\n').next().unwrap_or_default().trim();
    let length = first_line.chars().count();
    if length == 0 || length >= MAX_RENAME_SOURCE_CHARS {
        return None;
    }

    let sanitized = sanitize_name(first_line);
    if sanitized.trim().is_empty() {
        return None;
    }

    let mut name: String = sanitized.chars().take(MAX_DERIVED_NAME_CHARS).collect();
    if length > MAX_DERIVED_NAME_CHARS {
        name.push_str("...");
    }
    Some(name)
}
