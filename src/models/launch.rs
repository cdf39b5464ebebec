use serde::Serialize;

/// Which launch control the operator clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LaunchKind {
    OnDemand,
    Spot,
}

/// What the launch form currently has checked. Recomputed on every click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSelection {
    /// Empty when no instance-type radio is checked; the request goes out anyway.
    pub instance_type: String,
    pub zone: Option<String>,
}

/// The navigation the popover issues to create a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceLaunchRequest {
    pub instance_type: String,
    pub zone: Option<String>,
    pub spot: bool,
}

impl InstanceLaunchRequest {
    pub fn new(selection: LaunchSelection, kind: LaunchKind) -> Self {
        Self {
            instance_type: selection.instance_type,
            zone: selection.zone,
            spot: kind == LaunchKind::Spot,
        }
    }

    /// Query parameters in the order the dashboard expects them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("instance_type", self.instance_type.clone())];
        if let Some(zone) = &self.zone {
            pairs.push(("zone", zone.clone()));
        }
        if self.spot {
            pairs.push(("spot_bid", "True".to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_request_appends_flag_last() {
        let req = InstanceLaunchRequest::new(
            LaunchSelection {
                instance_type: "p3.2xlarge".into(),
                zone: Some("us-east-1b".into()),
            },
            LaunchKind::Spot,
        );
        let keys: Vec<&str> = req.query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["instance_type", "zone", "spot_bid"]);
    }

    #[test]
    fn on_demand_without_zone_has_single_pair() {
        let req = InstanceLaunchRequest::new(LaunchSelection::default(), LaunchKind::OnDemand);
        assert_eq!(req.query_pairs(), vec![("instance_type", String::new())]);
    }
}
