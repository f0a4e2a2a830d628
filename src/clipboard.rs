//! Clipboard access for copying generated passwords

use arboard::Clipboard;
use tracing::debug;

use crate::error::{Error, Result};

/// Destination for copied text
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    /// Open the system clipboard; fails on headless hosts
    pub fn new() -> Result<Self> {
        Ok(Self { inner: Clipboard::new()? })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text.to_owned())?;
        debug!(chars = text.chars().count(), "copied text to clipboard");
        Ok(())
    }
}

/// In-memory clipboard, useful for front ends without a display
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Copy `text` to `sink`, refusing empty text
pub fn copy_text<S: ClipboardSink + ?Sized>(sink: &mut S, text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::Clipboard("nothing to copy".to_string()));
    }
    sink.set_text(text)
}
