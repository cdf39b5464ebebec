use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use super::state::{NodeRecord, ServerState};
use super::templates::{
    AlertView, AlertsTemplate, InstanceTypeRow, LaunchPopoverTemplate, NodeRow, NodesPageTemplate,
};
use crate::api::NODES_PAGE_PATH;
use crate::models::{find_instance_type, AlertKind, INSTANCE_CATALOG};
use crate::utils::parse_flag;

/// Launch confirmations disappear on their own after this long.
const LAUNCH_ALERT_TTL_SECS: i64 = 300;

fn render<T: Template>(tpl: T) -> Response {
    match tpl.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(%e, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

fn alerts_fragment(state: &ServerState) -> Response {
    let alerts = state
        .alert_queue()
        .alerts()
        .iter()
        .map(|a| AlertView {
            id: a.id.clone(),
            css_class: a.kind.css_class(),
            title: a.title.clone(),
            message: a.message.clone(),
        })
        .collect();
    render(AlertsTemplate { alerts })
}

pub async fn nodes_page(State(state): State<ServerState>) -> Response {
    let nodes = state
        .node_list()
        .iter()
        .map(|n| NodeRow {
            name: n.name.clone(),
            instance_type: n.instance_type.clone(),
            zone: n.zone.clone().unwrap_or_else(|| "any".into()),
            pricing: if n.spot { "spot" } else { "on-demand" },
            launched_at: n.launched_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        })
        .collect();
    render(NodesPageTemplate { nodes })
}

pub async fn nodes_alerts(State(state): State<ServerState>) -> Response {
    alerts_fragment(&state)
}

#[derive(Deserialize, Debug)]
pub struct ClearAlertQuery {
    pub alert_id: Option<String>,
}

/// Mutating GET kept for compatibility with the dashboard script; answers with
/// the remaining alerts.
pub async fn clear_alert(State(state): State<ServerState>, Query(q): Query<ClearAlertQuery>) -> Response {
    if let Some(id) = q.alert_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        let removed = state.alert_queue().remove_alert(id);
        tracing::info!(alert_id = id, removed, "clear_alert");
    }
    alerts_fragment(&state)
}

pub async fn launch_popover(State(state): State<ServerState>) -> Response {
    let instance_types = INSTANCE_CATALOG
        .iter()
        .enumerate()
        .map(|(i, t)| InstanceTypeRow {
            name: t.name,
            category: t.category.label(),
            hourly_cost: format!("{:.4}", t.hourly_cost),
            checked: i == 0,
        })
        .collect();
    render(LaunchPopoverTemplate {
        instance_types,
        zones: state.zones.as_ref().clone(),
    })
}

#[derive(Deserialize, Debug)]
pub struct AddNodeQuery {
    pub instance_type: Option<String>,
    pub zone: Option<String>,
    pub spot_bid: Option<String>,
}

/// Record the node, queue an alert describing the outcome and send the
/// browser back to the dashboard.
pub async fn add_node(State(state): State<ServerState>, Query(q): Query<AddNodeQuery>) -> Redirect {
    let instance_type = q.instance_type.unwrap_or_default().trim().to_string();
    let zone = q.zone.map(|z| z.trim().to_string()).filter(|z| !z.is_empty());
    let spot = parse_flag(q.spot_bid.as_deref(), false);

    if find_instance_type(&instance_type).is_none() {
        tracing::warn!(%instance_type, "add_node rejected unknown instance type");
        state.alert_queue().add_alert(
            AlertKind::Error,
            "Launch failed",
            format!("Unknown instance type '{}'.", instance_type),
            None,
        );
        return Redirect::to(NODES_PAGE_PATH);
    }
    if let Some(z) = &zone {
        if !state.zones.contains(z) {
            tracing::warn!(zone = %z, "add_node rejected unknown zone");
            state.alert_queue().add_alert(
                AlertKind::Error,
                "Launch failed",
                format!("Unknown availability zone '{}'.", z),
                None,
            );
            return Redirect::to(NODES_PAGE_PATH);
        }
    }

    let node = NodeRecord {
        name: state.next_node_name(),
        instance_type,
        zone,
        spot,
        launched_at: Utc::now(),
    };
    tracing::info!(name = %node.name, instance_type = %node.instance_type, spot, "node added");
    let pricing = if spot { "spot bid" } else { "on-demand" };
    state.alert_queue().add_alert(
        AlertKind::Success,
        "Node launching",
        format!("{} ({}, {}) is starting.", node.name, node.instance_type, pricing),
        Some(Duration::seconds(LAUNCH_ALERT_TTL_SECS)),
    );
    state.node_list().push(node);
    Redirect::to(NODES_PAGE_PATH)
}

#[derive(Deserialize, Debug)]
pub struct RemoveNodeQuery {
    pub name: Option<String>,
}

pub async fn remove_node(State(state): State<ServerState>, Query(q): Query<RemoveNodeQuery>) -> Redirect {
    let name = q.name.unwrap_or_default();
    let removed = {
        let mut nodes = state.node_list();
        let before = nodes.len();
        nodes.retain(|n| n.name != name);
        before != nodes.len()
    };
    if removed {
        tracing::info!(%name, "node removed");
        state.alert_queue().add_alert(
            AlertKind::Info,
            "Node terminating",
            format!("{} is shutting down.", name),
            Some(Duration::seconds(LAUNCH_ALERT_TTL_SECS)),
        );
    } else {
        state.alert_queue().add_alert(
            AlertKind::Warning,
            "Nothing to terminate",
            format!("No node named '{}'.", name),
            None,
        );
    }
    Redirect::to(NODES_PAGE_PATH)
}
