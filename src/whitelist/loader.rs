use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::WhitelistCache;
use crate::api::{ApiError, PartnerApi, DOMAIN_KIND};
use crate::monitor::MonitorEvent;

/// Result of one pagination run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub pages: usize,
    pub concepts: usize,
    /// Set when a page request failed and pagination stopped early.
    pub error: Option<ApiError>,
}

/// Fetches every page of partner domains and appends them to `cache` as they
/// arrive. A failed page request ends the run; whatever was already appended
/// stays in the cache.
pub async fn load_whitelist<A: PartnerApi>(api: &A, cache: &WhitelistCache) -> LoadSummary {
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    let mut concepts = 0;

    loop {
        let page = match api.list_domains(DOMAIN_KIND, cursor.as_deref()).await {
            Ok(page) => page,
            Err(err) => {
                warn!(
                    status = ?err.status_code(),
                    error = %err,
                    pages,
                    "Whitelist fetch failed, keeping partial whitelist"
                );
                return LoadSummary {
                    pages,
                    concepts,
                    error: Some(err),
                };
            }
        };

        pages += 1;
        concepts += page.concepts.len();
        let total = cache.append(page.concepts);
        debug!(page = pages, total, "Appended concept page");

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(pages, concepts, "Whitelist pagination finished");
    LoadSummary {
        pages,
        concepts,
        error: None,
    }
}

/// Runs [`load_whitelist`] on the background runtime and reports the summary
/// to the main loop.
pub fn spawn_loader<A>(
    runtime: &Handle,
    api: Arc<A>,
    cache: WhitelistCache,
    events: Sender<MonitorEvent>,
) -> JoinHandle<()>
where
    A: PartnerApi + 'static,
{
    runtime.spawn(async move {
        let summary = load_whitelist(api.as_ref(), &cache).await;
        if events.send(MonitorEvent::WhitelistLoaded(summary)).is_err() {
            debug!("Monitor gone before whitelist load finished");
        }
    })
}
