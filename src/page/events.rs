use tokio::sync::mpsc;

use crate::models::LaunchKind;

/// Interactions the page delivers to its single delegated listener.
/// Identifiers travel with the event, so nothing is rebound after a re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The close animation of an alert finished.
    AlertClosed { alert_id: String },
    /// `.btn-launch` or `.btn-spot` was clicked.
    Launch(LaunchKind),
    /// `.btn-cancel-option` was clicked.
    Cancel,
    /// A table on the page re-rendered its rows.
    TableRefreshed { table_id: String },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<PageEvent>,
}

impl EventBus {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PageEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns false once the listener is gone.
    pub fn emit(&self, event: PageEvent) -> bool {
        if self.tx.send(event).is_err() {
            tracing::warn!("page event dropped: listener closed");
            return false;
        }
        true
    }
}
