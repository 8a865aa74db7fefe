//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

/// Border of a panel that currently receives input.
pub fn focused_border() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Key hint for an action that can run now.
pub fn enabled_hint() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// Key hint for an action blocked at a boundary or with nothing loaded.
pub fn disabled_hint() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Rendered generated link.
pub fn link() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

/// Placeholder text shown in empty panels.
pub fn dim() -> Style {
    Style::default().fg(Color::Indexed(245))
}

/// Section titles in overlays.
pub fn section() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
