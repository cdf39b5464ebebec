use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::alert_queue::AlertQueue;

/// A node launched through the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub name: String,
    pub instance_type: String,
    pub zone: Option<String>,
    pub spot: bool,
    pub launched_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ServerState {
    pub alerts: Arc<Mutex<AlertQueue>>,
    pub nodes: Arc<Mutex<Vec<NodeRecord>>>,
    pub zones: Arc<Vec<String>>,
    next_node: Arc<AtomicU32>,
}

impl ServerState {
    pub fn new(zones: Vec<String>) -> Self {
        Self {
            alerts: Arc::new(Mutex::new(AlertQueue::new())),
            nodes: Arc::new(Mutex::new(Vec::new())),
            zones: Arc::new(zones),
            next_node: Arc::new(AtomicU32::new(1)),
        }
    }

    pub fn alert_queue(&self) -> MutexGuard<'_, AlertQueue> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn node_list(&self) -> MutexGuard<'_, Vec<NodeRecord>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Node names follow the cluster convention `node001`, `node002`, ...
    pub fn next_node_name(&self) -> String {
        format!("node{:03}", self.next_node.fetch_add(1, Ordering::Relaxed))
    }
}
