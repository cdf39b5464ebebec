use std::sync::Arc;

use serde::Serialize;

use super::DashboardError;
use crate::api::{add_node_url, FragmentFetcher, LAUNCH_POPOVER_PATH};
use crate::models::{InstanceLaunchRequest, LaunchKind};
use crate::page::{lock_page, PageError, RadioGroup, SharedPage, LAUNCH_FORM_CONTAINER};

/// Where a launch click sent the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchNavigation {
    pub request: InstanceLaunchRequest,
    pub url: String,
}

/// The popover hanging off the launch button.
#[derive(Clone)]
pub struct LaunchPopover {
    page: SharedPage,
    fetcher: Arc<dyn FragmentFetcher>,
}

impl LaunchPopover {
    pub fn new(page: SharedPage, fetcher: Arc<dyn FragmentFetcher>) -> Self {
        Self { page, fetcher }
    }

    /// Fetch the launch-options form once and make it the popover's content.
    /// Opening the popover later never fetches again.
    pub async fn initialize(&self) -> Result<(), DashboardError> {
        let body = match self.fetcher.fetch(LAUNCH_POPOVER_PATH).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to populate launch panel.");
                return Err(e.into());
            }
        };
        let mut page = lock_page(&self.page);
        page.install_launch_form(&body)?;
        page.popover_mut().configure(LAUNCH_FORM_CONTAINER);
        let form = page.launch_form().map(|f| (f.instance_types.len(), f.zones.len()));
        if let Some((types, zones)) = form {
            tracing::info!(types, zones, "launch popover configured");
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        lock_page(&self.page).popover().content_region().is_some()
    }

    /// Show the popover and return its content.
    pub fn open(&self) -> Option<String> {
        lock_page(&self.page).open_popover()
    }

    pub fn select_instance_type(&self, instance_type: &str) -> Result<(), PageError> {
        lock_page(&self.page).check_radio(RadioGroup::InstanceType, instance_type)
    }

    pub fn select_zone(&self, zone: Option<&str>) -> Result<(), PageError> {
        let mut page = lock_page(&self.page);
        match zone {
            Some(z) => page.check_radio(RadioGroup::Zone, z),
            None => page.uncheck_radios(RadioGroup::Zone),
        }
    }

    /// Read the checked rows, build the add-node URL and replace the page
    /// location with it. No validation: an unchecked instance type goes out
    /// empty. Returns `None` when the popover never loaded, since its buttons
    /// do not exist then.
    pub fn on_launch(&self, kind: LaunchKind) -> Option<LaunchNavigation> {
        let mut page = lock_page(&self.page);
        if page.popover().content_region().is_none() {
            tracing::warn!(?kind, "launch clicked before the launch panel loaded");
            return None;
        }
        let selection = page.launch_form().map(|f| f.selection()).unwrap_or_default();
        let request = InstanceLaunchRequest::new(selection, kind);
        let url = add_node_url(&request);
        tracing::info!(instance_type = %request.instance_type, zone = ?request.zone, spot = request.spot, "launching node");
        page.navigate(url.clone());
        Some(LaunchNavigation { request, url })
    }

    /// Hide the popover. Purely cosmetic; returns whether it was showing.
    pub fn on_cancel(&self) -> bool {
        lock_page(&self.page).popover_mut().dismiss()
    }
}
