use anyhow::Result;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Clipboard, ClipboardRead};

#[derive(Debug)]
struct MemoryState {
    content: ClipboardRead,
    label: Option<String>,
    writes: usize,
}

/// In-process clipboard. Clones share the same content.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryClipboard {
    pub fn new(content: ClipboardRead) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                content,
                label: None,
                writes: 0,
            })),
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self::new(ClipboardRead::from_text(text))
    }

    /// Simulates a copy by another application.
    pub fn set(&self, content: ClipboardRead) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.content = content;
        state.label = None;
    }

    pub fn content(&self) -> ClipboardRead {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .content
            .clone()
    }

    pub fn label(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .label
            .clone()
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).writes
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> ClipboardRead {
        self.content()
    }

    fn write_text(&mut self, label: &str, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.content = ClipboardRead::from_text(text);
        state.label = Some(label.to_string());
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_clipboard_write_records_label() {
        let mut clipboard = MemoryClipboard::with_text("https://amazon.com");
        let observer = clipboard.clone();

        clipboard.write_text("wild.link", "https://wild.link/abc").unwrap();

        assert_eq!(observer.content(), ClipboardRead::Text("https://wild.link/abc".into()));
        assert_eq!(observer.label().as_deref(), Some("wild.link"));
        assert_eq!(observer.writes(), 1);
    }

    #[test]
    fn test_memory_clipboard_set_clears_label() {
        let mut clipboard = MemoryClipboard::with_text("a");
        clipboard.write_text("wild.link", "b").unwrap();
        clipboard.set(ClipboardRead::NotText);

        assert_eq!(clipboard.read(), ClipboardRead::NotText);
        assert!(clipboard.label().is_none());
    }
}
