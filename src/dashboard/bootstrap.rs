use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::{AlertsPanel, LaunchNavigation, LaunchPopover, PollingHandle};
use crate::api::FragmentFetcher;
use crate::models::LaunchKind;
use crate::page::{lock_page, EventBus, Page, PageError, PageEvent, SharedPage, WidgetKind};

/// The delegated listener: one handler per interaction type, with the target
/// identifier read from the event at dispatch time.
#[derive(Clone)]
pub struct EventHandlers {
    page: SharedPage,
    alerts: AlertsPanel,
    launch: LaunchPopover,
}

impl EventHandlers {
    pub async fn handle(&self, event: PageEvent) {
        match event {
            PageEvent::AlertClosed { alert_id } => {
                lock_page(&self.page).finish_closing(&alert_id);
                let _ = self.alerts.dismiss(&alert_id).await;
            }
            PageEvent::Launch(kind) => {
                let _ = self.launch.on_launch(kind);
            }
            PageEvent::Cancel => {
                self.launch.on_cancel();
            }
            PageEvent::TableRefreshed { table_id } => {
                match lock_page(&self.page).enable_widgets(WidgetKind::Confirmation) {
                    Ok(n) => tracing::debug!(%table_id, newly_enabled = n, "confirmation re-enabled"),
                    Err(e) => tracing::warn!(%table_id, error = %e, "Failed to enable confirmation."),
                }
            }
        }
    }

    /// Drain events until every sender is gone. Dismiss requests run on their
    /// own task so a slow clear never holds up other clicks.
    async fn listen(self, mut rx: mpsc::UnboundedReceiver<PageEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                PageEvent::AlertClosed { .. } => {
                    let handlers = self.clone();
                    tokio::spawn(async move { handlers.handle(event).await });
                }
                other => self.handle(other).await,
            }
        }
        tracing::debug!("page listener stopped");
    }
}

/// A bootstrapped dashboard page with its listener and alert polling running.
pub struct Dashboard {
    page: SharedPage,
    handlers: EventHandlers,
    events: EventBus,
    listener: JoinHandle<()>,
    polling: PollingHandle,
}

impl Dashboard {
    /// Page-ready sequence: enable widgets on flagged elements, start polling
    /// alerts (first refresh immediately), then load the launch popover while
    /// that refresh is in flight.
    pub async fn bootstrap(
        shell: impl Into<String>,
        fetcher: Arc<dyn FragmentFetcher>,
        poll_interval: Duration,
    ) -> Self {
        let page = Page::new(shell).shared();
        {
            let mut p = lock_page(&page);
            for kind in [WidgetKind::Popover, WidgetKind::Confirmation] {
                if let Err(e) = p.enable_widgets(kind) {
                    tracing::warn!(?kind, error = %e, "Failed to enable widgets.");
                }
            }
        }

        let alerts = AlertsPanel::new(page.clone(), fetcher.clone());
        let launch = LaunchPopover::new(page.clone(), fetcher);
        let handlers = EventHandlers {
            page: page.clone(),
            alerts: alerts.clone(),
            launch: launch.clone(),
        };

        let (events, rx) = EventBus::channel();
        let listener = tokio::spawn(handlers.clone().listen(rx));

        // polling first: its immediate refresh must not wait on the launch form
        let polling = alerts.schedule_polling(poll_interval);
        // failure is logged; the page works without the popover
        let _ = launch.initialize().await;

        tracing::info!("dashboard bootstrapped");
        Self {
            page,
            handlers,
            events,
            listener,
            polling,
        }
    }

    pub fn page(&self) -> SharedPage {
        self.page.clone()
    }

    pub fn alerts(&self) -> &AlertsPanel {
        &self.handlers.alerts
    }

    pub fn launch(&self) -> &LaunchPopover {
        &self.handlers.launch
    }

    pub fn subscribe_alerts(&self) -> watch::Receiver<u64> {
        self.handlers.alerts.subscribe()
    }

    /// Handle an event inline instead of through the listener.
    pub async fn dispatch(&self, event: PageEvent) {
        self.handlers.handle(event).await;
    }

    pub fn emit(&self, event: PageEvent) -> bool {
        self.events.emit(event)
    }

    /// Operator closed an alert: start its close and notify the listener.
    pub fn close_alert(&self, alert_id: &str) -> Result<(), PageError> {
        lock_page(&self.page).close_alert(alert_id)?;
        self.emit(PageEvent::AlertClosed {
            alert_id: alert_id.to_string(),
        });
        Ok(())
    }

    /// Launch through the handler directly, returning where the page went.
    pub fn launch_now(&self, kind: LaunchKind) -> Option<LaunchNavigation> {
        self.handlers.launch.on_launch(kind)
    }

    /// Replace a table region and announce the refresh.
    pub fn refresh_table(&self, table_id: &str, html: impl Into<String>) {
        lock_page(&self.page).set_region(table_id, html);
        self.emit(PageEvent::TableRefreshed {
            table_id: table_id.to_string(),
        });
    }

    pub fn is_polling(&self) -> bool {
        self.polling.is_running()
    }

    /// Stop polling and let the listener drain.
    pub async fn shutdown(self) {
        let Self {
            events,
            listener,
            polling,
            ..
        } = self;
        polling.stop().await;
        drop(events);
        if let Err(e) = listener.await {
            tracing::warn!(error = %e, "page listener ended abnormally");
        }
        tracing::info!("dashboard shut down");
    }
}
