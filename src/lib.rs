// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. session::SessionState)
    clippy::module_name_repetitions
)]

//! # Linenav
//!
//! A terminal line navigator with templated link generation.
//!
//! Linenav loads a plain text file and shows it one line at a time:
//! - Step forward and back, or jump to any line index
//! - Copy the current line to the clipboard
//! - Build a URL by substituting the current line into a template
//! - Reopen the last file at the last position on startup
//!
//! ## Architecture
//!
//! Linenav uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state, wrapping a serializable [`session::SessionState`]
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions, backed by [`session::reduce`]
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`session`]: Navigator state machine and persistence
//! - [`document`]: Line splitting
//! - [`link`]: Template substitution
//! - [`source`]: File reads and the background restore fetch
//! - [`clipboard`]: Clipboard sink
//! - [`config`]: Saved command-line defaults
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod link;
pub mod session;
pub mod source;
pub mod ui;
