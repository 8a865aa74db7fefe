use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{InputMode, Model};
use crate::link;

use super::{PANEL_HEIGHT, overlays, status, style};

/// Split the screen into header, line, controls, template, link and footer rows.
pub fn main_layout(area: Rect, toast_visible: bool) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(PANEL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(PANEL_HEIGHT),
            Constraint::Length(PANEL_HEIGHT),
            Constraint::Length(u16::from(toast_visible)),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let chunks = main_layout(area, model.active_toast().is_some());

    status::render_file_header(model, frame, chunks[0]);
    render_line_panel(model, frame, chunks[1]);
    render_controls(model, frame, chunks[2]);
    render_template_panel(model, frame, chunks[3]);
    render_link_panel(model, frame, chunks[4]);
    status::render_toast_bar(model, frame, chunks[5]);
    status::render_status_bar(model, frame, chunks[6]);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.prompt_active() {
        overlays::render_prompt_overlay(model, frame, area);
    }
    if model.alert.is_some() {
        overlays::render_alert_overlay(model, frame, area);
    }
}

fn render_line_panel(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let title = if session.has_document() {
        format!(" Line {}  [index {}] ", session.position_label(), session.cursor())
    } else {
        " Line ".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let body = match session.current_line() {
        Some(line) => Paragraph::new(line.to_string()).wrap(Wrap { trim: false }),
        None if session.pending_restore().is_some() => {
            Paragraph::new("Reopening last file...").style(style::dim())
        }
        None => Paragraph::new("No file loaded. Press f to open one.").style(style::dim()),
    };
    frame.render_widget(body.block(block), area);
}

fn render_controls(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let hint = |enabled: bool, key: &'static str, label: &'static str| -> [Span<'static>; 3] {
        let style = if enabled {
            style::enabled_hint()
        } else {
            style::disabled_hint()
        };
        [
            Span::styled(key, style),
            Span::styled(label, if enabled { Style::default() } else { style }),
            Span::raw("  "),
        ]
    };

    let loaded = session.has_document();
    let mut spans = vec![Span::raw(" ")];
    spans.extend(hint(session.can_go_previous(), "←", " Back"));
    spans.extend(hint(session.can_go_next(), "→", " Next"));
    spans.extend(hint(loaded, "c", " Copy"));
    spans.extend(hint(loaded, "g", " Go To"));
    spans.extend(hint(session.openable_link().is_some(), "o", " Open link"));
    spans.extend(hint(true, "f", " File"));
    spans.extend(hint(true, "e", " Template"));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_template_panel(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let editing = model.mode == InputMode::Template;
    let title = if link::has_marker(session.template(), session.marker()) {
        " Template ".to_string()
    } else {
        format!(" Template (no {} marker) ", session.marker())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if editing {
            style::focused_border()
        } else {
            Style::default()
        });

    let mut text = session.template().to_string();
    if editing {
        text.push('█');
    }
    let body = if text.is_empty() {
        Paragraph::new(format!("Enter URL with {}", session.marker())).style(style::dim())
    } else {
        Paragraph::new(text)
    };
    frame.render_widget(body.block(block), area);
}

fn render_link_panel(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" Link ").borders(Borders::ALL);
    let body = match model.session.openable_link() {
        Some(url) => Paragraph::new(url).style(style::link()),
        None => Paragraph::new(""),
    };
    frame.render_widget(body.block(block), area);
}
