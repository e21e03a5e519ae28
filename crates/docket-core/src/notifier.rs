//! Webhook delivery for domain events.
//!
//! The dispatcher subscribes to the store's event channel and POSTs every
//! event to the configured automation webhook. Delivery is best-effort: a
//! failed request is logged and dropped, never retried.

use std::time::Duration;

use chrono::Utc;
use docket_db::{settings, DbPool};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::DocketResult;
use crate::event::{CaseEvent, EventReceiver};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome counters reported when the dispatcher stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: usize,
    pub failed: usize,
    /// Events received while no webhook URL was configured.
    pub skipped: usize,
    /// Events lost because the receiver fell behind the channel.
    pub lagged: u64,
}

/// Posts events to a webhook endpoint via HTTP.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        debug!(timeout_ms = timeout.as_millis() as u64, "WebhookNotifier initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Send one event. Returns whether the endpoint answered with a success status.
    ///
    /// Errors are logged here and never returned.
    pub async fn deliver(&self, url: &str, event: &CaseEvent) -> bool {
        debug!(url = %url, action = event.action(), "Sending webhook");

        match self.client.post(url).json(event).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    debug!(action = event.action(), "Webhook delivered");
                    true
                } else {
                    warn!(
                        action = event.action(),
                        status_code = %response.status(),
                        "Webhook rejected with status"
                    );
                    false
                }
            }
            Err(e) => {
                warn!(
                    action = event.action(),
                    error = %e,
                    url = %url,
                    "Failed to trigger webhook"
                );
                false
            }
        }
    }

    /// Send a `test_webhook` event and report the HTTP status to the caller.
    ///
    /// Unlike regular deliveries, a transport failure is returned so the
    /// user who asked for the test sees it.
    pub async fn send_test(&self, url: &str) -> DocketResult<reqwest::StatusCode> {
        let event = CaseEvent::test_webhook(Utc::now());
        info!(url = %url, "Sending test webhook");
        let response = self.client.post(url).json(&event).send().await?;
        Ok(response.status())
    }

    /// Spawn the dispatch loop on the current tokio runtime.
    ///
    /// The webhook URL is looked up for every event so a change made
    /// mid-session takes effect immediately; `url_override` wins when set.
    /// The task finishes once every event sender has been dropped.
    pub fn spawn_dispatcher(
        self,
        mut rx: EventReceiver,
        pool: DbPool,
        url_override: Option<String>,
    ) -> JoinHandle<DispatchStats> {
        tokio::spawn(async move {
            let mut stats = DispatchStats::default();

            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let Some(url) = resolve_url(&pool, url_override.as_deref()) else {
                            debug!(action = event.action(), "No webhook configured, skipping");
                            stats.skipped += 1;
                            continue;
                        };
                        if self.deliver(&url, &event).await {
                            stats.delivered += 1;
                        } else {
                            stats.failed += 1;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        warn!(skipped = n, "Webhook dispatcher fell behind, events dropped");
                        stats.lagged += n;
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            debug!(?stats, "Webhook dispatcher stopped");
            stats
        })
    }
}

impl Default for WebhookNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

fn resolve_url(pool: &DbPool, url_override: Option<&str>) -> Option<String> {
    if let Some(url) = url_override.filter(|u| !u.trim().is_empty()) {
        return Some(url.to_string());
    }
    match settings::get_webhook_url(pool) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Could not read webhook URL");
            None
        }
    }
}
