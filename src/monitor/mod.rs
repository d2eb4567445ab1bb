use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::PartnerApi;
use crate::clipboard::Clipboard;
use crate::matcher::{match_clipboard, MatchOutcome};
use crate::rewriter::{spawn_rewrite, VanityResult, VANITY_LABEL};
use crate::whitelist::{spawn_loader, LoadSummary, WhitelistCache};

/// Messages consumed by the monitor's main loop.
#[derive(Debug)]
pub enum MonitorEvent {
    /// The clipboard changed. Carries no content; the monitor re-reads it.
    ClipboardChanged,
    VanityReady(VanityResult),
    WhitelistLoaded(LoadSummary),
    Shutdown,
}

/// Owns the clipboard and drives the match and rewrite flow. Everything that
/// touches the clipboard runs on the thread calling [`Monitor::run`]; network
/// work goes to `runtime` and comes back as [`MonitorEvent`]s.
pub struct Monitor<A, C> {
    api: Arc<A>,
    clipboard: C,
    cache: WhitelistCache,
    runtime: Handle,
    events_tx: Sender<MonitorEvent>,
    events_rx: Receiver<MonitorEvent>,
}

impl<A, C> Monitor<A, C>
where
    A: PartnerApi + 'static,
    C: Clipboard,
{
    pub fn new(api: Arc<A>, clipboard: C, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            api,
            clipboard,
            cache: WhitelistCache::new(),
            runtime,
            events_tx,
            events_rx,
        }
    }

    pub fn cache(&self) -> &WhitelistCache {
        &self.cache
    }

    /// Sender for posting events (clipboard notifications, shutdown) to this monitor.
    pub fn sender(&self) -> Sender<MonitorEvent> {
        self.events_tx.clone()
    }

    /// Starts the one-off whitelist load.
    pub fn start_loader(&self) -> JoinHandle<()> {
        spawn_loader(
            &self.runtime,
            Arc::clone(&self.api),
            self.cache.clone(),
            self.sender(),
        )
    }

    /// Runs one matching pass over the current clipboard content and starts a
    /// rewrite on a match.
    pub fn on_clipboard_changed(&mut self) -> MatchOutcome {
        let read = self.clipboard.read();
        let outcome = match_clipboard(&read, &self.cache);

        if let Some(url) = outcome.matched_url() {
            spawn_rewrite(
                &self.runtime,
                Arc::clone(&self.api),
                url.to_string(),
                self.sender(),
            );
        }

        outcome
    }

    /// Replaces the clipboard with the vanity link, if one was created.
    /// Returns whether the clipboard was written.
    pub fn on_vanity_ready(&mut self, result: VanityResult) -> bool {
        let Some(vanity) = result.vanity else {
            debug!(url = %result.original, "No vanity link, leaving clipboard untouched");
            return false;
        };

        match self.clipboard.write_text(VANITY_LABEL, &vanity) {
            Ok(()) => {
                info!(original = %result.original, vanity = %vanity, "Clipboard rewritten");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to replace clipboard with vanity link");
                false
            }
        }
    }

    pub fn handle_event(&mut self, event: MonitorEvent) -> ControlFlow<()> {
        match event {
            MonitorEvent::ClipboardChanged => {
                self.on_clipboard_changed();
            }
            MonitorEvent::VanityReady(result) => {
                self.on_vanity_ready(result);
            }
            MonitorEvent::WhitelistLoaded(summary) => match &summary.error {
                None => info!(concepts = summary.concepts, pages = summary.pages, "Whitelist ready"),
                Some(err) => warn!(
                    concepts = summary.concepts,
                    pages = summary.pages,
                    error = %err,
                    "Whitelist is partial"
                ),
            },
            MonitorEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Processes events until a `Shutdown` arrives.
    pub fn run(&mut self) {
        info!("Clipboard monitor running");
        while let Ok(event) = self.events_rx.recv() {
            if self.handle_event(event).is_break() {
                break;
            }
        }
        info!("Clipboard monitor stopped");
    }
}
