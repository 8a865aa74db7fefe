use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::link::{self, DEFAULT_MARKER, DEFAULT_TEMPLATE};

/// Where the cursor currently points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No document loaded; navigation is inert.
    Empty,
    /// Pointing at a valid line index.
    At(usize),
}

/// A restore fetch that has been started but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRestore {
    /// Generation current when the fetch started
    pub generation: u64,
    /// Path being fetched
    pub path: String,
}

/// The complete navigator session.
///
/// Everything the reducer reads or writes lives here, so a session can be
/// snapshotted, serialized and replayed without a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(super) document: Document,
    pub(super) cursor: usize,
    pub(super) template: String,
    pub(super) marker: String,
    pub(super) generation: u64,
    pub(super) pending_restore: Option<PendingRestore>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE, DEFAULT_MARKER)
    }
}

impl SessionState {
    pub fn new(template: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            document: Document::empty(),
            cursor: 0,
            template: template.into(),
            marker: marker.into(),
            generation: 0,
            pending_restore: None,
        }
    }

    /// Seed the cursor from persisted state.
    ///
    /// The value is kept as-is while no document is loaded and clamped when
    /// one arrives.
    #[must_use]
    pub const fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Raw cursor value, meaningful only when [`Self::position`] is `At`.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Identifier of the current user-initiated load.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn pending_restore(&self) -> Option<&PendingRestore> {
        self.pending_restore.as_ref()
    }

    pub fn position(&self) -> CursorState {
        if self.document.contains_index(self.cursor) {
            CursorState::At(self.cursor)
        } else {
            CursorState::Empty
        }
    }

    /// The line under the cursor.
    pub fn current_line(&self) -> Option<&str> {
        match self.position() {
            CursorState::At(index) => self.document.line_at(index),
            CursorState::Empty => None,
        }
    }

    /// The template with the current line substituted in.
    pub fn generated_link(&self) -> Option<String> {
        self.current_line()
            .map(|line| link::generate(&self.template, &self.marker, line))
    }

    /// The generated link, unless it is empty and there is nothing to open.
    pub fn openable_link(&self) -> Option<String> {
        self.generated_link().filter(|url| !url.is_empty())
    }

    /// `"n / total"` using 1-based line numbers.
    pub fn position_label(&self) -> String {
        match self.position() {
            CursorState::At(index) => format!("{} / {}", index + 1, self.document.len()),
            CursorState::Empty => format!("0 / {}", self.document.len()),
        }
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.position(), CursorState::At(i) if i + 1 < self.document.len())
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self.position(), CursorState::At(i) if i > 0)
    }

    pub fn has_document(&self) -> bool {
        !self.document.is_empty()
    }
}
