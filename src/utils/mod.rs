// URL handling utilities
pub mod query_string;
pub mod url_builder;

// Parsing utilities
pub mod parse_flag;

pub use query_string::{build_query_string, with_query};
pub use url_builder::absolute_url;
pub use parse_flag::parse_flag;
