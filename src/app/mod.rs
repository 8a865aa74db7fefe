//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{InputMode, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;

use crate::clipboard::{ClipboardSink, TerminalClipboard};
use crate::link::{DEFAULT_MARKER, DEFAULT_TEMPLATE};
use crate::session::{MemoryStore, SessionStore};
use crate::source::{FsFetcher, SourceFetcher};

/// Main application struct that owns the session store and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    restore_enabled: bool,
    template: String,
    marker: String,
    store: Box<dyn SessionStore>,
    fetcher: Arc<dyn SourceFetcher>,
    clipboard: Box<dyn ClipboardSink>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
    state_path: Option<PathBuf>,
}

impl App {
    /// Create an application with an in-memory store and no initial file.
    pub fn new() -> Self {
        Self {
            file_path: None,
            restore_enabled: true,
            template: DEFAULT_TEMPLATE.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            store: Box::new(MemoryStore::new()),
            fetcher: Arc::new(FsFetcher),
            clipboard: Box::new(TerminalClipboard::stdout()),
            config_global_path: None,
            config_local_path: None,
            state_path: None,
        }
    }

    /// Load this file at startup instead of restoring the last one.
    pub fn with_file(mut self, file_path: Option<PathBuf>) -> Self {
        self.file_path = file_path;
        self
    }

    /// Enable or disable reopening the last file at startup.
    pub const fn with_restore(mut self, enabled: bool) -> Self {
        self.restore_enabled = enabled;
        self
    }

    /// Template used when none has been persisted.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Placeholder replaced by the current line.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set where the session is persisted.
    pub fn with_store(mut self, store: Box<dyn SessionStore>, path: Option<PathBuf>) -> Self {
        self.store = store;
        self.state_path = path;
        self
    }

    /// Replace the source used for the background restore.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn SourceFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Replace where copied lines are sent.
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// The session store, for inspection after a run.
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
