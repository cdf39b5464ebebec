//! Stand-in for the observatory dashboard server.
//!
//! Renders the fragments the client consumes (alerts, launch form, page
//! shell) from in-memory state. Nothing is persisted.

pub mod alert_queue;
pub mod handlers;
pub mod state;
pub mod templates;

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::api::{ADD_NODE_PATH, CLEAR_ALERT_PATH, LAUNCH_POPOVER_PATH, NODES_ALERTS_PATH, NODES_PAGE_PATH};

pub use alert_queue::{AlertQueue, QueuedAlert};
pub use state::{NodeRecord, ServerState};

pub const REMOVE_NODE_PATH: &str = "/observatory/remove_node";

pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .route(NODES_PAGE_PATH, get(handlers::nodes_page))
        .route(NODES_ALERTS_PATH, get(handlers::nodes_alerts))
        .route(CLEAR_ALERT_PATH, get(handlers::clear_alert))
        .route(LAUNCH_POPOVER_PATH, get(handlers::launch_popover))
        .route(ADD_NODE_PATH, get(handlers::add_node))
        .route(REMOVE_NODE_PATH, get(handlers::remove_node))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until the task is dropped or the
/// listener fails.
pub async fn serve(listener: tokio::net::TcpListener, state: ServerState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "observatory server listening");
    }
    axum::serve(listener, build_app(state)).await
}

pub async fn bind(host: &str, port: u16) -> std::io::Result<tokio::net::TcpListener> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    tokio::net::TcpListener::bind(addr).await
}
