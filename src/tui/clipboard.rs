//! Clipboard access for the verse copy action.
//!
//! The terminal build writes through an OSC 52 escape sequence, which most
//! modern terminals (and tmux with `set-clipboard on`) forward to the system
//! clipboard. Terminals that ignore OSC 52 fail silently; that is accepted,
//! since a failed copy is never surfaced to the reader.

use std::fmt;
use std::io::{Write, stdout};

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;

#[derive(Debug)]
pub struct ClipboardError {
    message: String,
}

impl ClipboardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard write failed: {}", self.message)
    }
}

impl std::error::Error for ClipboardError {}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes to the system clipboard via OSC 52.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        write_osc52(&mut stdout(), text)
    }
}

/// Emits the OSC 52 sequence for `text`. Success only means the bytes were
/// written; whether the terminal honoured them cannot be observed.
fn write_osc52(out: &mut impl Write, text: &str) -> Result<(), ClipboardError> {
    execute!(out, CopyToClipboard::to_clipboard_from(text))
        .map_err(|e| ClipboardError::new(e.to_string()))?;
    log::debug!(
        "OSC 52 clipboard sequence written ({} bytes); terminal support unknown",
        text.len()
    );
    Ok(())
}
