use chrono::{DateTime, Duration, Utc};

use crate::models::AlertKind;

/// A server-side alert waiting to be shown or dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedAlert {
    pub id: String,
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl QueuedAlert {
    pub fn expired_at(&self, t: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < t)
    }
}

/// Dismissable alerts in creation order.
#[derive(Debug, Default)]
pub struct AlertQueue {
    alerts: Vec<QueuedAlert>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a new alert. Without an expiration it stays until dismissed.
    pub fn add_alert(
        &mut self,
        kind: AlertKind,
        title: impl Into<String>,
        message: impl Into<String>,
        expiration: Option<Duration>,
    ) -> QueuedAlert {
        let alert = QueuedAlert {
            id: hex::encode(rand::random::<[u8; 16]>()),
            kind,
            title: title.into(),
            message: message.into(),
            expires_at: expiration.map(|d| Utc::now() + d),
        };
        self.alerts.push(alert.clone());
        alert
    }

    /// Current alerts, with anything expired pruned first.
    pub fn alerts(&mut self) -> &[QueuedAlert] {
        self.alerts_at(Utc::now())
    }

    pub fn alerts_at(&mut self, now: DateTime<Utc>) -> &[QueuedAlert] {
        self.alerts.retain(|a| !a.expired_at(now));
        &self.alerts
    }

    /// Remove by id; unknown ids are not an error so repeated clears are harmless.
    pub fn remove_alert(&mut self, alert_id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != alert_id);
        before != self.alerts.len()
    }
}
