use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use yansi::Paint;

use super::error::FetchError;
use crate::config::DashboardConfig;
use crate::utils::absolute_url;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Source of server-rendered HTML fragments.
///
/// `url` is an endpoint path with its query already attached; implementations
/// decide how to resolve it. A fetch has no side effect beyond the request.
#[async_trait]
pub trait FragmentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches fragments from a live dashboard over HTTP.
pub struct HttpFragmentFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFragmentFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("obs/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, FetchError> {
        Self::new(config.base_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FragmentFetcher for HttpFragmentFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let full_url = absolute_url(&self.base_url, url);

        // --- Curl Logging ---
        let parts = [
            Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
            format!("-X {}", Paint::new("GET").fg(yansi::Color::Yellow).bold()),
            format!("'{}'", Paint::new(&full_url).fg(yansi::Color::Cyan)),
        ];
        log_output(format!("Request:\n{}", parts.join(" ")));
        // --------------------

        tracing::debug!(url = %full_url, "fetching fragment");
        let resp = self
            .client
            .get(&full_url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: full_url,
            });
        }

        let body = resp.text().await.map_err(|e| FetchError::Body(e.to_string()))?;
        log_output(format!(
            "Response:\n{}",
            Paint::new(format!("{} ({} bytes)", status, body.len())).rgb(100, 100, 100)
        ));
        Ok(body)
    }
}
