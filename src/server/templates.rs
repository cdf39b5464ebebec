use askama::Template;

pub struct AlertView {
    pub id: String,
    pub css_class: &'static str,
    pub title: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "alerts.html")]
pub struct AlertsTemplate {
    pub alerts: Vec<AlertView>,
}

pub struct InstanceTypeRow {
    pub name: &'static str,
    pub category: &'static str,
    pub hourly_cost: String,
    pub checked: bool,
}

#[derive(Template)]
#[template(path = "launch_popover.html")]
pub struct LaunchPopoverTemplate {
    pub instance_types: Vec<InstanceTypeRow>,
    pub zones: Vec<String>,
}

pub struct NodeRow {
    pub name: String,
    pub instance_type: String,
    pub zone: String,
    pub pricing: &'static str,
    pub launched_at: String,
}

#[derive(Template)]
#[template(path = "nodes.html")]
pub struct NodesPageTemplate {
    pub nodes: Vec<NodeRow>,
}
