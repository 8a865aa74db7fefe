use thiserror::Error;
use tracing::{debug, info, warn};

use super::state::{CursorState, PendingRestore, SessionState};
use crate::document::Document;
use crate::source::{RestoreOutcome, SourceError};

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user loaded a file
    Uploaded { path: String, text: String },
    /// A background fetch of the remembered path was started
    RestoreStarted { path: String },
    /// The background fetch finished
    RestoreResolved {
        generation: u64,
        path: String,
        result: Result<String, SourceError>,
    },
    /// Move to the next line
    Next,
    /// Move to the previous line
    Previous,
    /// Jump to a 0-based line index
    GoTo(i64),
    /// Jump to the first line
    Reset,
    /// Replace the link template
    EditTemplate(String),
    /// Copy the current line
    Copy,
}

impl From<RestoreOutcome> for Event {
    fn from(outcome: RestoreOutcome) -> Self {
        Self::RestoreResolved {
            generation: outcome.generation,
            path: outcome.path,
            result: outcome.result,
        }
    }
}

/// Side effects requested by a transition, carried out by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistCursor(usize),
    PersistTemplate(String),
    PersistFilePath(String),
    ClearFilePath,
    CopyToClipboard(String),
}

/// Recoverable conditions reported by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("Invalid index {target} (document has {len} lines)")]
    InvalidIndex { target: i64, len: usize },
    #[error("Source unavailable: {source}")]
    SourceUnavailable {
        #[from]
        source: SourceError,
    },
}

/// The outcome of applying one [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
    pub error: Option<NavError>,
}

impl Transition {
    const fn unchanged(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
            error: None,
        }
    }

    fn with_effects(state: SessionState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            error: None,
        }
    }

    const fn failed(state: SessionState, effects: Vec<Effect>, error: NavError) -> Self {
        Self {
            state,
            effects,
            error: Some(error),
        }
    }
}

/// Pure session transition.
///
/// No IO happens here: persistence and clipboard writes are returned as
/// [`Effect`]s for the caller to perform.
pub fn reduce(mut state: SessionState, event: Event) -> Transition {
    match event {
        Event::Uploaded { path, text } => {
            state.generation += 1;
            state.pending_restore = None;
            state.document = Document::from_text(path.clone(), &text);
            state.cursor = 0;
            info!(
                path = %path,
                lines = state.document.len(),
                generation = state.generation,
                "document loaded"
            );
            Transition::with_effects(
                state,
                vec![Effect::PersistFilePath(path), Effect::PersistCursor(0)],
            )
        }
        Event::RestoreStarted { path } => {
            state.pending_restore = Some(PendingRestore {
                generation: state.generation,
                path,
            });
            Transition::unchanged(state)
        }
        Event::RestoreResolved {
            generation,
            path,
            result,
        } => {
            if generation != state.generation {
                debug!(
                    path = %path,
                    stale = generation,
                    current = state.generation,
                    "discarding stale restore result"
                );
                return Transition::unchanged(state);
            }
            state.pending_restore = None;
            match result {
                Ok(text) => {
                    state.document = Document::from_text(path.clone(), &text);
                    if !state.document.contains_index(state.cursor) {
                        state.cursor = 0;
                    }
                    info!(
                        path = %path,
                        cursor = state.cursor,
                        lines = state.document.len(),
                        "session restored"
                    );
                    let cursor = state.cursor;
                    Transition::with_effects(state, vec![Effect::PersistCursor(cursor)])
                }
                Err(err) => {
                    warn!(path = %path, error = %err, "restore failed, forgetting path");
                    Transition::failed(state, vec![Effect::ClearFilePath], err.into())
                }
            }
        }
        Event::Next => match state.position() {
            CursorState::At(i) if i + 1 < state.document.len() => move_to(state, i + 1),
            _ => Transition::unchanged(state),
        },
        Event::Previous => match state.position() {
            CursorState::At(i) if i > 0 => move_to(state, i - 1),
            _ => Transition::unchanged(state),
        },
        Event::GoTo(target) => {
            if !state.has_document() {
                return Transition::unchanged(state);
            }
            let len = state.document.len();
            match usize::try_from(target) {
                Ok(index) if index < len => move_to(state, index),
                _ => {
                    debug!(target, len, "rejected go-to");
                    Transition::failed(state, Vec::new(), NavError::InvalidIndex { target, len })
                }
            }
        }
        Event::Reset => {
            if state.has_document() {
                move_to(state, 0)
            } else {
                Transition::unchanged(state)
            }
        }
        Event::EditTemplate(template) => {
            state.template.clone_from(&template);
            Transition::with_effects(state, vec![Effect::PersistTemplate(template)])
        }
        Event::Copy => match state.current_line() {
            Some(line) => {
                let line = line.to_string();
                Transition::with_effects(state, vec![Effect::CopyToClipboard(line)])
            }
            None => Transition::unchanged(state),
        },
    }
}

fn move_to(mut state: SessionState, index: usize) -> Transition {
    state.cursor = index;
    Transition::with_effects(state, vec![Effect::PersistCursor(index)])
}
