use tracing::{debug, trace};

use crate::app::Model;
use crate::app::model::InputMode;
use crate::session::Event;
use crate::source::RestoreOutcome;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Move to the next line
    NextLine,
    /// Move to the previous line
    PrevLine,
    /// Jump to the first line
    FirstLine,
    /// Jump to the last line
    LastLine,

    // Actions
    /// Copy the current line to the clipboard
    CopyLine,
    /// Open the generated link in the system browser
    OpenLink,

    // Prompts
    /// Open the Go To modal
    StartGoTo,
    /// Open the file prompt
    StartOpen,
    /// Append a character to the active prompt
    PromptInput(char),
    /// Delete the last prompt character
    PromptBackspace,
    /// Confirm the active prompt
    PromptSubmit,
    /// Close the active prompt without acting
    PromptCancel,

    // Template
    /// Start editing the link template
    StartTemplateEdit,
    /// Append a character to the template
    TemplateInput(char),
    /// Delete the last template character
    TemplateBackspace,
    /// Clear the template
    TemplateClear,
    /// Stop editing the template
    FinishTemplateEdit,

    // Sources
    /// A file was read from disk
    FileLoaded { path: String, text: String },
    /// A background restore of the remembered file started
    RestoreStarted(String),
    /// The background restore finished
    RestoreFinished(RestoreOutcome),

    // Overlays
    /// Dismiss the blocking alert
    DismissAlert,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function; those that a transition
/// needs are queued on the model and carried out by the caller.
pub fn update(mut model: Model, msg: Message) -> Model {
    trace!(?msg, "update");
    match msg {
        // Navigation
        Message::NextLine => {
            model.apply(Event::Next);
        }
        Message::PrevLine => {
            model.apply(Event::Previous);
        }
        Message::FirstLine => {
            model.apply(Event::Reset);
        }
        Message::LastLine => {
            if let Some(last) = model.session.document().last_index() {
                model.apply(Event::GoTo(i64::try_from(last).unwrap_or(i64::MAX)));
            }
        }

        Message::CopyLine => {
            model.apply(Event::Copy);
        }
        // Handled in effects
        Message::OpenLink | Message::Redraw => {}

        // Prompts
        Message::StartGoTo => {
            if model.session.has_document() {
                model.open_prompt(InputMode::GoTo);
            }
        }
        Message::StartOpen => model.open_prompt(InputMode::Open),
        Message::PromptInput(c) => {
            if model.prompt_active() {
                model.prompt_input.push(c);
            }
        }
        Message::PromptBackspace => {
            model.prompt_input.pop();
        }
        Message::PromptCancel => model.close_prompt(),
        Message::PromptSubmit => match model.mode {
            InputMode::GoTo => submit_goto(&mut model),
            InputMode::Open => {
                let path = model.prompt_input.trim();
                if !path.is_empty() {
                    model.pending_open = Some(path.into());
                    model.close_prompt();
                }
            }
            InputMode::Normal | InputMode::Template => {}
        },

        // Template
        Message::StartTemplateEdit => model.mode = InputMode::Template,
        Message::TemplateInput(c) => {
            let mut template = model.session.template().to_string();
            template.push(c);
            model.apply(Event::EditTemplate(template));
        }
        Message::TemplateBackspace => {
            let mut template = model.session.template().to_string();
            if template.pop().is_some() {
                model.apply(Event::EditTemplate(template));
            }
        }
        Message::TemplateClear => {
            if !model.session.template().is_empty() {
                model.apply(Event::EditTemplate(String::new()));
            }
        }
        Message::FinishTemplateEdit => model.mode = InputMode::Normal,

        // Sources
        Message::FileLoaded { path, text } => {
            model.apply(Event::Uploaded { path, text });
        }
        Message::RestoreStarted(path) => {
            model.apply(Event::RestoreStarted { path });
        }
        Message::RestoreFinished(outcome) => {
            // Restore failures are logged by the reducer and never surfaced.
            if let Some(err) = model.apply(Event::from(outcome)) {
                debug!(error = %err, "restore did not produce a document");
            }
        }

        // Overlays
        Message::DismissAlert => model.alert = None,
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        Message::Quit => model.should_quit = true,
    }
    model
}

fn submit_goto(model: &mut Model) {
    let raw = model.prompt_input.trim().to_string();
    let Ok(target) = raw.parse::<i64>() else {
        model.alert = Some(format!("Invalid index: '{raw}' is not a number"));
        return;
    };
    // The prompt stays open on a rejected index so the input can be corrected.
    match model.apply(Event::GoTo(target)) {
        Some(err) => model.alert = Some(err.to_string()),
        None => model.close_prompt(),
    }
}
