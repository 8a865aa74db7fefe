//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: the main panels (file, line, controls, template, link)
//! - [`style`]: Theming and colors
//! - status bar, toasts and modal overlays

pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::{centered_popup_rect, prompt_rect};
pub use render::{main_layout, render};

/// Height of a bordered single-row panel.
pub const PANEL_HEIGHT: u16 = 3;
