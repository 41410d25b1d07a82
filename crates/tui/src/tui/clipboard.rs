use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::core::Clipboard;

/// Copies text through the terminal using the OSC 52 escape sequence.
///
/// Works over SSH and inside tmux (with `set-clipboard on`); terminals that do
/// not understand the sequence ignore it.
pub struct Osc52Clipboard<W: Write> {
    writer: W,
}

impl Osc52Clipboard<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<()> {
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.writer, "\x1b]52;c;{payload}\x07").context("failed to write to terminal")?;
        self.writer.flush().context("failed to flush terminal")?;
        debug!(bytes = text.len(), "copied text via OSC 52");
        Ok(())
    }
}
