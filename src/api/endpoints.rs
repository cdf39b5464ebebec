//! Paths of the dashboard endpoints the client talks to.
//!
//! Every endpoint is a plain GET returning an HTML fragment. `clear_alert`
//! mutates server state through a GET; that is kept as-is for compatibility
//! with the deployed dashboard rather than switched to another verb.

use crate::models::InstanceLaunchRequest;
use crate::utils::with_query;

pub const NODES_PAGE_PATH: &str = "/observatory/nodes";
pub const NODES_ALERTS_PATH: &str = "/observatory/nodes_alerts";
pub const CLEAR_ALERT_PATH: &str = "/observatory/clear_alert";
pub const LAUNCH_POPOVER_PATH: &str = "/observatory/launch_popover";
pub const ADD_NODE_PATH: &str = "/observatory/add_node";

pub fn clear_alert_url(alert_id: &str) -> String {
    with_query(CLEAR_ALERT_PATH, &[("alert_id", alert_id)])
}

pub fn add_node_url(request: &InstanceLaunchRequest) -> String {
    with_query(ADD_NODE_PATH, &request.query_pairs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_alert_carries_the_id() {
        assert_eq!(clear_alert_url("3f2a"), "/observatory/clear_alert?alert_id=3f2a");
    }
}
