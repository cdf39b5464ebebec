//! Operator-side client for the observatory compute-node dashboard.
//!
//! The dashboard page is modelled headlessly: [`page::Page`] holds the
//! regions the server-rendered fragments land in, and the components in
//! [`dashboard`] keep those regions current (alert polling, the launch
//! popover, widget enablement). [`server`] renders the same fragments so the
//! client can be exercised without the production dashboard.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod page;
pub mod server;
pub mod utils;
