use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{Clipboard, ClipboardRead};
use crate::monitor::MonitorEvent;

/// Turns clipboard polling into payload-free change notifications.
#[derive(Debug, Default)]
pub struct ClipboardWatcher {
    last_seen: Option<ClipboardRead>,
}

impl ClipboardWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the clipboard and reports whether it differs from the previous
    /// poll. The first poll only records a baseline.
    pub fn poll<C: Clipboard>(&mut self, clipboard: &mut C) -> bool {
        let current = clipboard.read();
        match self.last_seen.replace(current) {
            None => false,
            Some(previous) => self.last_seen.as_ref() != Some(&previous),
        }
    }
}

/// Polls the clipboard on a dedicated thread and sends
/// `MonitorEvent::ClipboardChanged` for each change until `stop` is set or the
/// monitor hangs up.
pub fn spawn_watcher<C, F>(
    open: F,
    interval: Duration,
    events: Sender<MonitorEvent>,
    stop: Arc<AtomicBool>,
) -> Result<JoinHandle<()>>
where
    C: Clipboard,
    F: FnOnce() -> Result<C> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("clipboard-watcher".to_string())
        .spawn(move || {
            let mut clipboard = match open() {
                Ok(clipboard) => clipboard,
                Err(e) => {
                    warn!(error = %e, "Clipboard watcher could not open clipboard");
                    return;
                }
            };
            let mut watcher = ClipboardWatcher::new();
            let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
            info!(interval_ms, "Clipboard watcher started");

            while !stop.load(Ordering::Acquire) {
                if watcher.poll(&mut clipboard) && events.send(MonitorEvent::ClipboardChanged).is_err() {
                    debug!("Monitor hung up, stopping clipboard watcher");
                    break;
                }
                thread::sleep(interval);
            }

            info!("Clipboard watcher stopped");
        })?;

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use std::sync::mpsc;

    #[test]
    fn test_first_poll_is_baseline() {
        let mut clipboard = MemoryClipboard::with_text("hello");
        let mut watcher = ClipboardWatcher::new();

        assert!(!watcher.poll(&mut clipboard));
        assert!(!watcher.poll(&mut clipboard));
    }

    #[test]
    fn test_poll_detects_each_change() {
        let mut clipboard = MemoryClipboard::with_text("hello");
        let mut watcher = ClipboardWatcher::new();
        watcher.poll(&mut clipboard);

        clipboard.set(ClipboardRead::Text("https://amazon.com/x".into()));
        assert!(watcher.poll(&mut clipboard));
        assert!(!watcher.poll(&mut clipboard));

        clipboard.set(ClipboardRead::NotText);
        assert!(watcher.poll(&mut clipboard));
    }

    #[test]
    fn test_spawned_watcher_sends_change_and_stops() {
        let clipboard = MemoryClipboard::with_text("start");
        let handle_clipboard = clipboard.clone();
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let handle = spawn_watcher(
            move || Ok(handle_clipboard),
            Duration::from_millis(5),
            tx,
            stop.clone(),
        )
        .unwrap();

        // Give the watcher time to take its baseline.
        thread::sleep(Duration::from_millis(50));
        clipboard.set(ClipboardRead::Text("changed".into()));

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, MonitorEvent::ClipboardChanged));

        stop.store(true, Ordering::Release);
        handle.join().unwrap();
    }
}
