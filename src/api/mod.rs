// Fragment I/O
pub mod client;
pub mod endpoints;
pub mod error;

// Re-export commonly used items
pub use client::{set_silent, FragmentFetcher, HttpFragmentFetcher};
pub use endpoints::{
    add_node_url, clear_alert_url, ADD_NODE_PATH, CLEAR_ALERT_PATH, LAUNCH_POPOVER_PATH,
    NODES_ALERTS_PATH, NODES_PAGE_PATH,
};
pub use error::FetchError;
