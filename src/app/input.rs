use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode, Message, Model};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Resize(_, _) => Some(Message::Redraw),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
            return Some(Message::Quit);
        }

        // Any key dismisses the alert
        if model.alert.is_some() {
            return Some(Message::DismissAlert);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::F(1) => Some(Message::HideHelp),
                _ => None,
            };
        }

        match model.mode {
            InputMode::GoTo | InputMode::Open => {
                return match key.code {
                    KeyCode::Enter => Some(Message::PromptSubmit),
                    KeyCode::Esc => Some(Message::PromptCancel),
                    KeyCode::Backspace => Some(Message::PromptBackspace),
                    KeyCode::Char(c) => Some(Message::PromptInput(c)),
                    _ => None,
                };
            }
            InputMode::Template => {
                return match key.code {
                    KeyCode::Enter | KeyCode::Esc => Some(Message::FinishTemplateEdit),
                    KeyCode::Backspace => Some(Message::TemplateBackspace),
                    KeyCode::Char('u') if ctrl => Some(Message::TemplateClear),
                    KeyCode::Char(c) => Some(Message::TemplateInput(c)),
                    _ => None,
                };
            }
            InputMode::Normal => {}
        }

        let session = &model.session;
        match key.code {
            // Navigation
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j' | 'n' | ' ') => {
                session.can_go_next().then_some(Message::NextLine)
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k' | 'p' | 'b') => {
                session.can_go_previous().then_some(Message::PrevLine)
            }
            KeyCode::Home => session.can_go_previous().then_some(Message::FirstLine),
            KeyCode::End => session.can_go_next().then_some(Message::LastLine),
            KeyCode::Char('g' | ':') => session.has_document().then_some(Message::StartGoTo),

            // Actions
            KeyCode::Char('c' | 'y') => session.has_document().then_some(Message::CopyLine),
            KeyCode::Enter | KeyCode::Char('o') => {
                session.openable_link().is_some().then_some(Message::OpenLink)
            }
            KeyCode::Char('f') => Some(Message::StartOpen),
            KeyCode::Char('e' | 't') => Some(Message::StartTemplateEdit),

            // Other
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }
}
