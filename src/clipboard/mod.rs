#[cfg(test)]
pub mod memory;
pub mod watcher;

use anyhow::{Context, Result};
use tracing::{debug, warn};

#[cfg(test)]
pub use memory::MemoryClipboard;
pub use watcher::{spawn_watcher, ClipboardWatcher};

/// Snapshot of the primary clipboard's plain-text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardRead {
    Text(String),
    NotText,
    Empty,
}

impl ClipboardRead {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The platform clipboard as seen by the monitor.
pub trait Clipboard {
    fn read(&mut self) -> ClipboardRead;

    /// Replaces the primary clipboard content with `text`, tagged with `label`.
    fn write_text(&mut self, label: &str, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to access system clipboard")?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> ClipboardRead {
        match self.inner.get_text() {
            Ok(text) => ClipboardRead::from_text(text),
            Err(arboard::Error::ContentNotAvailable) => ClipboardRead::NotText,
            Err(e) => {
                warn!(error = %e, "Failed to read clipboard");
                ClipboardRead::NotText
            }
        }
    }

    fn write_text(&mut self, label: &str, text: &str) -> Result<()> {
        // arboard has no notion of clip labels, so the label only goes to the log.
        debug!(label = %label, "Writing clipboard");
        self.inner
            .set_text(text)
            .context("Failed to copy text to clipboard")?;
        Ok(())
    }
}
