use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::session::{Effect, store};
use crate::source::{RestoreTask, read_text};

impl App {
    /// Apply `msg` and everything it triggers, in order.
    pub(super) fn dispatch(&mut self, model: &mut Model, msg: Message) {
        let mut next = Some(msg);
        while let Some(msg) = next.take() {
            let side_msg = msg.clone();
            *model = update(std::mem::take(model), msg);
            next = self.handle_message_side_effects(model, &side_msg);
        }
    }

    /// Carry out the IO a message needs and return a follow-up message, if any.
    pub(super) fn handle_message_side_effects(
        &mut self,
        model: &mut Model,
        msg: &Message,
    ) -> Option<Message> {
        self.run_session_effects(model);

        match msg {
            Message::OpenLink => {
                Self::open_generated_link(model);
                None
            }
            Message::PromptSubmit => model
                .pending_open
                .take()
                .and_then(|path| Self::read_requested_file(model, &path)),
            Message::FileLoaded { path, .. } => {
                let lines = model.session.document().len();
                let name = Path::new(path)
                    .file_name()
                    .map_or_else(|| path.clone(), |n| n.to_string_lossy().to_string());
                model.show_toast(ToastLevel::Info, format!("Loaded {lines} line(s) from {name}"));
                None
            }
            _ => None,
        }
    }

    /// Load `path` as if the user had opened it.
    pub(super) fn open_file(&mut self, model: &mut Model, path: &Path) {
        if let Some(msg) = Self::read_requested_file(model, path) {
            self.dispatch(model, msg);
        }
    }

    /// Start fetching the remembered file in the background.
    pub(super) fn start_restore(&mut self, model: &mut Model, path: String) -> RestoreTask {
        let generation = model.session.generation();
        info!(path = %path, generation, "restoring last session");
        let task = RestoreTask::spawn(self.fetcher.clone(), path.clone(), generation);
        self.dispatch(model, Message::RestoreStarted(path));
        task
    }

    fn run_session_effects(&mut self, model: &mut Model) {
        for effect in model.take_effects() {
            if let Effect::CopyToClipboard(text) = &effect {
                self.copy_line(model, text);
                continue;
            }
            match store::persist(self.store.as_mut(), &effect) {
                Ok(_) => debug!(?effect, "session persisted"),
                Err(err) => {
                    warn!(error = %err, "failed to persist session");
                    model.show_toast(ToastLevel::Warning, format!("Session not saved: {err}"));
                }
            }
        }
    }

    fn copy_line(&mut self, model: &mut Model, text: &str) {
        let line = model.session.cursor() + 1;
        let chars = text.chars().count();
        match self.clipboard.write_text(text) {
            Ok(()) => model.show_toast(
                ToastLevel::Info,
                format!("Copied {chars} chars from line {line}"),
            ),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Copy failed: {err}")),
        }
    }

    fn read_requested_file(model: &mut Model, path: &Path) -> Option<Message> {
        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        match read_text(&resolved) {
            Ok(text) => Some(Message::FileLoaded {
                path: resolved.display().to_string(),
                text,
            }),
            Err(err) => {
                warn!(error = %err, "open failed");
                model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
                None
            }
        }
    }

    fn open_generated_link(model: &mut Model) {
        let Some(url) = model.session.openable_link() else {
            model.show_toast(ToastLevel::Info, "No link to open");
            return;
        };
        match open_external_link(&url) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Opened {url}")),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Open failed: {err}")),
        }
    }
}

fn browser_command(url: &str) -> Command {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// Launch the system browser without waiting on it.
fn open_external_link(url: &str) -> std::io::Result<()> {
    let mut child = browser_command(url).spawn()?;
    // Reaped off the UI thread.
    std::thread::spawn(move || child.wait());
    Ok(())
}
