//! Navigator session: state, transitions and persistence.
//!
//! - [`SessionState`]: the document, cursor and template, serializable
//! - [`reduce`]: pure transition function returning [`Effect`]s
//! - [`store`]: key-value persistence of the last file, cursor and template

mod reducer;
mod state;
pub mod store;

pub use reducer::{Effect, Event, NavError, Transition, reduce};
pub use state::{CursorState, PendingRestore, SessionState};
pub use store::{FileStore, MemoryStore, PersistedSession, SessionStore, StoreError};

/// Build the startup session from persisted values.
///
/// `fallback_template` is used when no template was persisted.
pub fn initial_state(
    persisted: &PersistedSession,
    fallback_template: &str,
    marker: &str,
) -> SessionState {
    let template = persisted
        .last_template
        .clone()
        .unwrap_or_else(|| fallback_template.to_string());
    SessionState::new(template, marker).with_cursor(persisted.last_cursor.unwrap_or(0))
}
