//! The scripted behaviour of the nodes dashboard: alert polling, the launch
//! popover and page bootstrap.

pub mod alerts;
pub mod bootstrap;
pub mod launch;
pub mod polling;

use thiserror::Error;

use crate::api::FetchError;
use crate::page::PageError;

pub use alerts::AlertsPanel;
pub use bootstrap::{Dashboard, EventHandlers};
pub use launch::{LaunchNavigation, LaunchPopover};
pub use polling::PollingHandle;

/// Outcome of a best-effort component operation. Components log these
/// themselves; the value is returned so callers can tell what happened.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Page(#[from] PageError),
}
