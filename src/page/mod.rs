//! Headless model of the dashboard page.
//!
//! The page is a set of named regions holding server-rendered HTML plus the
//! client state derived from them: the alerts on display, the launch form as
//! the operator has filled it in, popover visibility, enabled widgets and the
//! current location. Every component shares one [`SharedPage`]; locks are
//! never held across a fetch, so a late response simply overwrites whatever
//! an earlier one rendered.

pub mod events;
pub mod fragment;
pub mod popover;
pub mod widgets;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::models::Alert;

pub use events::{EventBus, PageEvent};
pub use fragment::{AlertBlock, LaunchForm, LaunchRow, RadioGroup};
pub use popover::{Popover, PopoverVisibility};
pub use widgets::{WidgetKind, WidgetRegistry};

pub const ALERTS_CONTAINER: &str = "alerts-container";
pub const LAUNCH_FORM_CONTAINER: &str = "instance-types-table-container";
pub const NODES_TABLE: &str = "nodes-table";

pub type SharedPage = Arc<Mutex<Page>>;

/// Lock the page. Handlers never panic while holding it, so a poisoned lock
/// still guards a consistent page.
pub fn lock_page(page: &SharedPage) -> MutexGuard<'_, Page> {
    page.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no alert with id {0} on the page")]
    UnknownAlert(String),
    #[error("alert {0} has no close button")]
    NotDismissable(String),
    #[error("alert {0} is already closing")]
    AlreadyClosing(String),
    #[error("the launch form has not been loaded")]
    LaunchFormMissing,
    #[error("no {group} option named {value}")]
    UnknownOption { group: &'static str, value: String },
    #[error("invalid selector {0}")]
    Selector(String),
}

/// Lifecycle of a single alert banner between renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Displayed,
    /// The operator closed it and the toolkit is animating it out.
    Closing,
    /// Gone from view; the clear request has been issued or is pending.
    RemovedPendingRefresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertElement {
    pub alert: Alert,
    pub dismissable: bool,
    pub state: AlertState,
}

#[derive(Debug, Default)]
pub struct Page {
    shell: String,
    regions: BTreeMap<String, String>,
    alerts: Vec<AlertElement>,
    launch_form: Option<LaunchForm>,
    popover: Popover,
    widgets: WidgetRegistry,
    location: Option<String>,
}

impl Page {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            ..Self::default()
        }
    }

    pub fn shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn region(&self, id: &str) -> Option<&str> {
        self.regions.get(id).map(String::as_str)
    }

    /// Replace a region's contents wholesale.
    pub fn set_region(&mut self, id: &str, html: impl Into<String>) {
        self.regions.insert(id.to_string(), html.into());
    }

    /// Replace the alerts region with an authoritative fragment. Any alert in a
    /// closing state is reconciled by simply being replaced.
    pub fn render_alerts(&mut self, html: &str) -> Result<usize, PageError> {
        let blocks = fragment::parse_alerts(html)?;
        self.set_region(ALERTS_CONTAINER, html);
        self.alerts = blocks
            .into_iter()
            .map(|b| AlertElement {
                alert: b.alert,
                dismissable: b.dismissable,
                state: AlertState::Displayed,
            })
            .collect();
        Ok(self.alerts.len())
    }

    pub fn alerts(&self) -> &[AlertElement] {
        &self.alerts
    }

    /// Alerts the operator can currently see.
    pub fn visible_alerts(&self) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| a.state == AlertState::Displayed)
            .map(|a| &a.alert)
            .collect()
    }

    pub fn alert_state(&self, alert_id: &str) -> Option<AlertState> {
        self.alerts.iter().find(|a| a.alert.id == alert_id).map(|a| a.state)
    }

    /// Operator pressed an alert's close button.
    pub fn close_alert(&mut self, alert_id: &str) -> Result<(), PageError> {
        let el = self
            .alerts
            .iter_mut()
            .find(|a| a.alert.id == alert_id)
            .ok_or_else(|| PageError::UnknownAlert(alert_id.to_string()))?;
        if !el.dismissable {
            return Err(PageError::NotDismissable(alert_id.to_string()));
        }
        if el.state != AlertState::Displayed {
            return Err(PageError::AlreadyClosing(alert_id.to_string()));
        }
        el.state = AlertState::Closing;
        Ok(())
    }

    /// The close animation finished. Unknown ids are ignored: a render may have
    /// replaced the element in the meantime.
    pub fn finish_closing(&mut self, alert_id: &str) {
        if let Some(el) = self.alerts.iter_mut().find(|a| a.alert.id == alert_id) {
            el.state = AlertState::RemovedPendingRefresh;
        }
    }

    /// Store the launch-options fragment and the form parsed from it.
    pub fn install_launch_form(&mut self, html: &str) -> Result<(), PageError> {
        let form = LaunchForm::parse(html)?;
        self.set_region(LAUNCH_FORM_CONTAINER, html);
        self.launch_form = Some(form);
        Ok(())
    }

    pub fn launch_form(&self) -> Option<&LaunchForm> {
        self.launch_form.as_ref()
    }

    pub fn check_radio(&mut self, group: RadioGroup, value: &str) -> Result<(), PageError> {
        let form = self.launch_form.as_mut().ok_or(PageError::LaunchFormMissing)?;
        if form.check(group, value) {
            Ok(())
        } else {
            Err(PageError::UnknownOption {
                group: group.input_name(),
                value: value.to_string(),
            })
        }
    }

    pub fn uncheck_radios(&mut self, group: RadioGroup) -> Result<(), PageError> {
        let form = self.launch_form.as_mut().ok_or(PageError::LaunchFormMissing)?;
        form.uncheck_all(group);
        Ok(())
    }

    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    pub fn popover_mut(&mut self) -> &mut Popover {
        &mut self.popover
    }

    /// Show the popover, returning the content its provider yields. `None` when
    /// the popover was never configured.
    pub fn open_popover(&mut self) -> Option<String> {
        let region = self.popover.content_region()?.to_string();
        let content = self.region(&region).unwrap_or_default().to_string();
        self.popover.show();
        Some(content)
    }

    pub fn widgets(&self) -> &WidgetRegistry {
        &self.widgets
    }

    /// Enable `kind` on every flagged element of the shell and all regions.
    pub fn enable_widgets(&mut self, kind: WidgetKind) -> Result<usize, PageError> {
        let mut ids = fragment::flagged_widgets(&self.shell, kind)?;
        for (region, html) in &self.regions {
            ids.extend(
                fragment::flagged_widgets(html, kind)?
                    .into_iter()
                    .map(|id| scope_positional_id(region, id)),
            );
        }
        Ok(self.widgets.enable(kind, ids))
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Replace the current location (no history entry).
    pub fn navigate(&mut self, url: impl Into<String>) {
        self.location = Some(url.into());
    }
}

/// Positional ids are only unique within one fragment; prefix them with the region.
fn scope_positional_id(region: &str, id: String) -> String {
    if id.contains(':') {
        format!("{region}/{id}")
    } else {
        id
    }
}
