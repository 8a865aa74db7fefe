use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::{InputMode, Model};

use super::style;

pub fn prompt_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(16).clamp(30, 60);
    centered_popup_rect(popup_width, 8, area)
}

pub fn render_prompt_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let (title, hint) = match model.mode {
        InputMode::GoTo => {
            let last = model.session.document().last_index().unwrap_or(0);
            ("Go To Line", format!("Line index 0-{last}"))
        }
        InputMode::Open => ("Open File", "Path to a text file".to_string()),
        InputMode::Normal | InputMode::Template => return,
    };
    let popup = prompt_rect(area);

    let lines = vec![
        Line::styled(hint, style::dim()),
        Line::raw(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(
                model.prompt_input.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("█"),
        ]),
        Line::raw(""),
        Line::styled("Enter: Go  Esc: Cancel", style::dim()),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .border_style(style::focused_border())
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_alert_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(message) = model.alert.as_deref() else {
        return;
    };
    let popup_width = area.width.saturating_sub(20).clamp(30, 56);
    let popup = centered_popup_rect(popup_width, 7, area);

    let lines = vec![
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::styled("Press any key", style::dim()),
    ];
    let block = Block::default()
        .title("Notice")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let path_or = |path: Option<&std::path::PathBuf>, fallback: &str| {
        path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
    };
    let global_cfg = path_or(model.config_global_path.as_ref(), "<unknown>");
    let local_cfg = path_or(model.config_local_path.as_ref(), "<none>");
    let state_file = path_or(model.state_path.as_ref(), "<memory>");

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Navigation", style::section()));
    lines.push(Line::raw("  → / l / j / Space   Next line"));
    lines.push(Line::raw("  ← / h / k / b       Previous line"));
    lines.push(Line::raw("  Home / End          First / last line"));
    lines.push(Line::raw("  g / :               Go to line index"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Line", style::section()));
    lines.push(Line::raw("  c / y               Copy current line"));
    lines.push(Line::raw("  o / Enter           Open generated link"));
    lines.push(Line::raw("  e / t               Edit link template"));
    lines.push(Line::raw(format!(
        "                      ({} is replaced by the line)",
        model.session.marker()
    )));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", style::section()));
    lines.push(Line::raw("  f                   Open a file"));
    lines.push(Line::raw("  q / Ctrl-c          Quit"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", style::section()));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines.push(Line::raw(format!("  Session: {state_file}")));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Esc closes", style::dim()));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
