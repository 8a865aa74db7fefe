use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::app::{InputMode, Model};

pub fn render_file_header(model: &Model, frame: &mut Frame, area: Rect) {
    let label = match model.session.document().name() {
        Some(name) => {
            let budget = usize::from(area.width).saturating_sub(" File: ".len());
            format!(" File: {}", truncate_start(name, budget))
        }
        None => " File: No file selected".to_string(),
    };
    let header = Paragraph::new(label).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let mode = match model.mode {
        InputMode::Normal => "",
        InputMode::GoTo => " [go to]",
        InputMode::Open => " [open]",
        InputMode::Template => " [editing template]",
    };
    let restore = if session.pending_restore().is_some() {
        " [restoring]"
    } else {
        ""
    };
    let status = format!(
        " Line {}{}{}  ?:help  q:quit",
        session.position_label(),
        mode,
        restore
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

/// Keep the end of `text` so it fits in `max_width` columns, marking the cut with `…`.
pub(super) fn truncate_start(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut kept = Vec::new();
    let mut width = 1;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        kept.push(c);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}
