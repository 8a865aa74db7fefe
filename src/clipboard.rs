//! Clipboard sink.
//!
//! Text is sent to the terminal as an OSC 52 escape so copying works over SSH
//! and inside multiplexers. On macOS `pbcopy` is tried first.

use std::io::{self, Stdout, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Best-effort destination for copied text.
pub trait ClipboardSink {
    /// # Errors
    /// Returns an error if the text could not be handed to the clipboard.
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Copies by writing OSC 52 to the terminal behind `out`.
#[derive(Debug)]
pub struct TerminalClipboard<W: Write> {
    out: W,
    prefer_pbcopy: bool,
}

impl TerminalClipboard<Stdout> {
    /// The controlling terminal, with `pbcopy` first where it exists.
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            prefer_pbcopy: cfg!(target_os = "macos"),
        }
    }
}

impl<W: Write> TerminalClipboard<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            prefer_pbcopy: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardSink for TerminalClipboard<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        if self.prefer_pbcopy && pipe_to_pbcopy(text).is_ok() {
            return Ok(());
        }
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()
    }
}

#[cfg(target_os = "macos")]
fn pipe_to_pbcopy(text: &str) -> io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    // Dropping stdin closes the pipe so pbcopy can finish.
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    if child.wait()?.success() {
        Ok(())
    } else {
        Err(io::Error::other("pbcopy exited with an error"))
    }
}

#[cfg(not(target_os = "macos"))]
fn pipe_to_pbcopy(_text: &str) -> io::Result<()> {
    Err(io::ErrorKind::Unsupported.into())
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
