use std::env;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ALERT_POLL_SECONDS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ZONES: &str = "us-east-1a,us-east-1b,us-east-1c";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Client-side settings shared by every dashboard component.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_base_url(),
            poll_interval: Duration::from_secs(get_alert_poll_seconds()?),
            request_timeout: Duration::from_secs(get_request_timeout_secs()?),
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_ALERT_POLL_SECONDS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_base_url() -> String {
    sanitize_base_url(&env::var("OBSERVATORY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
}

pub fn get_alert_poll_seconds() -> Result<u64, ConfigError> {
    positive_from_env("ALERT_POLL_SECONDS", DEFAULT_ALERT_POLL_SECONDS)
}

pub fn get_request_timeout_secs() -> Result<u64, ConfigError> {
    positive_from_env("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)
}

/// Availability zones offered by the stand-in server's launch form.
pub fn get_zones() -> Vec<String> {
    let raw = env::var("OBSERVATORY_ZONES").unwrap_or_else(|_| DEFAULT_ZONES.to_string());
    raw.split(',')
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .map(str::to_string)
        .collect()
}

fn positive_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value: raw }),
        },
        _ => Ok(default),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
