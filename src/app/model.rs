use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::session::{Effect, Event, NavError, SessionState, reduce};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which widget currently receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Go To modal
    GoTo,
    /// Open-file prompt
    Open,
    /// Editing the link template in place
    Template,
}

/// The complete application state.
///
/// Navigation state lives in [`SessionState`]; everything else here is
/// presentation: prompts, notices and overlays.
#[derive(Debug)]
pub struct Model {
    /// Document, cursor and template
    pub session: SessionState,
    /// Active input target
    pub mode: InputMode,
    /// Text typed into the active prompt
    pub prompt_input: String,
    /// Blocking notice, dismissed by any key
    pub alert: Option<String>,
    /// File requested through the open prompt, read by the effects layer
    pub pending_open: Option<PathBuf>,
    /// Effects produced by the last transition, not yet carried out
    pub pending_effects: Vec<Effect>,
    toast: Option<Toast>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Session store path shown in help
    pub state_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    pub fn new(session: SessionState) -> Self {
        Self {
            session,
            mode: InputMode::Normal,
            prompt_input: String::new(),
            alert: None,
            pending_open: None,
            pending_effects: Vec::new(),
            toast: None,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            state_path: None,
            should_quit: false,
        }
    }

    /// Run `event` through the session reducer, queueing its effects.
    pub(super) fn apply(&mut self, event: Event) -> Option<NavError> {
        let transition = reduce(std::mem::take(&mut self.session), event);
        self.session = transition.state;
        self.pending_effects.extend(transition.effects);
        transition.error
    }

    pub(super) fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending_effects)
    }

    pub(super) fn open_prompt(&mut self, mode: InputMode) {
        self.mode = mode;
        self.prompt_input.clear();
    }

    pub(super) fn close_prompt(&mut self) {
        self.mode = InputMode::Normal;
        self.prompt_input.clear();
    }

    pub const fn prompt_active(&self) -> bool {
        matches!(self.mode, InputMode::GoTo | InputMode::Open)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}
