use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::polling::PollingHandle;
use super::DashboardError;
use crate::api::{clear_alert_url, FragmentFetcher, NODES_ALERTS_PATH};
use crate::page::{lock_page, SharedPage};

/// Keeps the alerts region in sync with the server.
#[derive(Clone)]
pub struct AlertsPanel {
    page: SharedPage,
    fetcher: Arc<dyn FragmentFetcher>,
    renders: Arc<watch::Sender<u64>>,
}

impl AlertsPanel {
    pub fn new(page: SharedPage, fetcher: Arc<dyn FragmentFetcher>) -> Self {
        let (renders, _) = watch::channel(0);
        Self {
            page,
            fetcher,
            renders: Arc::new(renders),
        }
    }

    /// Receiver bumped after every successful render of the alerts region.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.renders.subscribe()
    }

    /// Fetch the current alert list and replace the region with it.
    /// On failure the region is left as it was.
    pub async fn refresh(&self) -> Result<usize, DashboardError> {
        match self.fetcher.fetch(NODES_ALERTS_PATH).await {
            Ok(body) => self.render(&body),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to populate alerts.");
                Err(e.into())
            }
        }
    }

    /// Ask the server to clear an alert; its answer is the new alert list.
    /// On failure nothing is restored and the next refresh reconciles.
    pub async fn dismiss(&self, alert_id: &str) -> Result<usize, DashboardError> {
        match self.fetcher.fetch(&clear_alert_url(alert_id)).await {
            Ok(body) => {
                tracing::info!(alert_id, "alert cleared");
                self.render(&body)
            }
            Err(e) => {
                tracing::warn!(alert_id, error = %e, "Failed to populate alerts.");
                Err(e.into())
            }
        }
    }

    /// Refresh now and then every `interval` until the handle is stopped,
    /// whatever the outcome of each refresh.
    pub fn schedule_polling(&self, interval: Duration) -> PollingHandle {
        tracing::info!(interval_secs = interval.as_secs_f64(), "starting alert polling");
        let panel = self.clone();
        PollingHandle::spawn(interval, move || {
            let panel = panel.clone();
            async move {
                // failures are already logged by refresh
                let _ = panel.refresh().await;
            }
        })
    }

    fn render(&self, body: &str) -> Result<usize, DashboardError> {
        let rendered = lock_page(&self.page).render_alerts(body);
        match rendered {
            Ok(count) => {
                tracing::debug!(count, "alerts rendered");
                self.renders.send_modify(|n| *n += 1);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to render alerts.");
                Err(e.into())
            }
        }
    }
}
