//! Per-invocation wiring of the store and the webhook dispatcher.

use std::time::Duration;

use anyhow::{Context, Result};
use docket_core::event::create_event_channel;
use docket_core::notifier::{DispatchStats, WebhookNotifier};
use docket_core::CaseStore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct Session {
    pub store: CaseStore,
    dispatcher: JoinHandle<DispatchStats>,
    drain_timeout: Duration,
}

impl Session {
    /// Open the store under the configured data directory and start the dispatcher.
    ///
    /// With `replacing`, an unreadable snapshot does not block the command,
    /// since it is about to replace the whole collection.
    pub fn open(config: &docket_core::config::Config, replacing: bool) -> Result<Self> {
        let pool = docket_db::init_pool(config.data_dir()).with_context(|| {
            format!("Failed to open data directory {}", config.data_dir().display())
        })?;

        let events = create_event_channel();
        // Subscribe before any mutation can publish.
        let rx = events.subscribe();
        let store = if replacing {
            CaseStore::load_for_replace(pool.clone(), events)
        } else {
            CaseStore::load(pool.clone(), events)
        }
        .context("Failed to load cases")?;

        let dispatcher = WebhookNotifier::new(config.webhook_timeout).spawn_dispatcher(
            rx,
            pool,
            config.webhook_url_override.clone(),
        );

        Ok(Self {
            store,
            dispatcher,
            // Room for a couple of slow requests queued behind each other.
            drain_timeout: config.webhook_timeout * 2,
        })
    }

    /// Close the event channel and give queued deliveries a bounded time to finish.
    pub async fn finish(self) {
        let Self {
            store,
            dispatcher,
            drain_timeout,
        } = self;
        drop(store);

        match tokio::time::timeout(drain_timeout, dispatcher).await {
            Ok(Ok(stats)) => debug!(?stats, "Webhook deliveries flushed"),
            Ok(Err(e)) => warn!(error = %e, "Webhook dispatcher panicked"),
            Err(_) => warn!(
                timeout_secs = drain_timeout.as_secs(),
                "Gave up waiting for webhook deliveries"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::config::Config;

    #[tokio::test]
    async fn test_unreadable_snapshot_only_opens_for_import() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("case-management-storage.json"), "{not json").unwrap();
        let config = Config::new(dir.path());

        assert!(Session::open(&config, false).is_err());

        let session = Session::open(&config, true).unwrap();
        assert!(session.store.cases().is_empty());
        assert!(session.store.last_error().is_some());
        session.finish().await;
    }
}
