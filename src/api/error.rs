/// Error types for fragment fetching
use thiserror::Error;

/// Why a fragment could not be fetched. Callers treat every variant the same
/// way (log and keep the current page content); the detail is for the log line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout and the like
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be read as text
    #[error("Failed to read response body: {0}")]
    Body(String),
}
