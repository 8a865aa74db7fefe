//! Text sources: synchronous file reads and the background restore fetch.
//!
//! The restore fetch runs on its own thread and reports back over a channel
//! that the event loop polls, so the UI stays interactive while it is pending.

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;
use tracing::debug;

/// Why a text source could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("{path} not found")]
    NotFound { path: String },
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("restore of {path} was interrupted")]
    Interrupted { path: String },
}

/// Reads the text behind a remembered path.
pub trait SourceFetcher: Send + Sync {
    /// Fetch the full text content at `path`.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the source is missing or unreadable.
    fn fetch(&self, path: &str) -> Result<String, SourceError>;
}

/// Fetches from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFetcher;

impl SourceFetcher for FsFetcher {
    fn fetch(&self, path: &str) -> Result<String, SourceError> {
        read_text(Path::new(path))
    }
}

/// Read a file as text, replacing invalid UTF-8.
///
/// # Errors
/// Returns [`SourceError::NotFound`] for missing files and
/// [`SourceError::Io`] for every other read failure.
pub fn read_text(path: &Path) -> Result<String, SourceError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(SourceError::NotFound {
            path: path.display().to_string(),
        }),
        Err(err) => Err(SourceError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }),
    }
}

/// Result of a finished restore fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub generation: u64,
    pub path: String,
    pub result: Result<String, SourceError>,
}

/// Handle to a restore fetch running in the background.
pub struct RestoreTask {
    rx: Receiver<RestoreOutcome>,
    generation: u64,
    path: String,
    done: bool,
}

impl RestoreTask {
    /// Start fetching `path`, stamping the outcome with `generation`.
    pub fn spawn(fetcher: Arc<dyn SourceFetcher>, path: String, generation: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            debug!(path = %worker_path, generation, "restore fetch started");
            let result = fetcher.fetch(&worker_path);
            let _ = tx.send(RestoreOutcome {
                generation,
                path: worker_path,
                result,
            });
        });
        Self {
            rx,
            generation,
            path,
            done: false,
        }
    }

    /// Returns the outcome once the fetch has finished, at most once.
    pub fn try_take(&mut self) -> Option<RestoreOutcome> {
        if self.done {
            return None;
        }
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.done = true;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.done = true;
                Some(RestoreOutcome {
                    generation: self.generation,
                    path: self.path.clone(),
                    result: Err(SourceError::Interrupted {
                        path: self.path.clone(),
                    }),
                })
            }
        }
    }
}
