use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, Model};
use crate::session::{self, PersistedSession};
use crate::source::RestoreTask;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let (mut model, restore) = self.start_session();

        // Initialize terminal
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - linenav requires an interactive terminal")?;

        // Main loop
        let result = self.event_loop(&mut terminal, &mut model, restore);

        // Restore terminal
        ratatui::restore();

        result
    }

    /// Build the initial model from persisted state.
    ///
    /// Loads the file given on the command line, or starts the background
    /// restore of the remembered one.
    pub(super) fn start_session(&mut self) -> (Model, Option<RestoreTask>) {
        let persisted = PersistedSession::read(self.store.as_ref());
        debug!(?persisted, "read persisted session");

        let state = session::initial_state(&persisted, &self.template, &self.marker);
        let mut model = Model::new(state);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model.state_path.clone_from(&self.state_path);

        if let Some(path) = self.file_path.clone() {
            self.open_file(&mut model, &path);
            return (model, None);
        }

        let restore = match persisted.last_file_path {
            Some(path) if self.restore_enabled => Some(self.start_restore(&mut model, path)),
            Some(path) => {
                info!(path = %path, "restore disabled, not reopening last file");
                None
            }
            None => None,
        };
        (model, restore)
    }

    /// Deliver a finished restore to the model. Returns true when it resolved.
    pub(super) fn poll_restore(&mut self, model: &mut Model, restore: &mut Option<RestoreTask>) -> bool {
        let Some(outcome) = restore.as_mut().and_then(RestoreTask::try_take) else {
            return false;
        };
        *restore = None;
        self.dispatch(model, Message::RestoreFinished(outcome));
        true
    }

    fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        mut restore: Option<RestoreTask>,
    ) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if self.poll_restore(model, &mut restore) {
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if restore.is_some() {
                25
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    self.dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        self.dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                tracing::trace!(
                    frame = frame_idx,
                    draw_ms = draw_start.elapsed().as_secs_f64() * 1000.0,
                    "frame drawn"
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
