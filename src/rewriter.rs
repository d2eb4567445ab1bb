use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::PartnerApi;
use crate::monitor::MonitorEvent;

/// Clip label used when the clipboard is replaced with a vanity link.
pub const VANITY_LABEL: &str = "wild.link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityResult {
    pub original: String,
    /// `None` when the backend call failed.
    pub vanity: Option<String>,
}

/// Asks the backend for a vanity link. Failures are logged and collapse to `None`.
pub async fn request_vanity<A: PartnerApi>(api: &A, original: &str) -> Option<String> {
    debug!(url = %original, "Creating vanity link");
    match api.create_vanity_link(original).await {
        Ok(link) => Some(link.vanity_url),
        Err(err) => {
            debug!(status = ?err.status_code(), error = %err, "Vanity link creation failed");
            None
        }
    }
}

/// Runs [`request_vanity`] on the background runtime and posts the result to
/// the main loop, which owns the clipboard.
pub fn spawn_rewrite<A>(
    runtime: &Handle,
    api: Arc<A>,
    original: String,
    events: Sender<MonitorEvent>,
) -> JoinHandle<()>
where
    A: PartnerApi + 'static,
{
    runtime.spawn(async move {
        let vanity = request_vanity(api.as_ref(), &original).await;
        let result = VanityResult { original, vanity };
        if events.send(MonitorEvent::VanityReady(result)).is_err() {
            debug!("Monitor gone before vanity link arrived");
        }
    })
}
