#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use observatory::api::{FetchError, FragmentFetcher};

/// Answers fetches from a table of canned responses and records every URL asked for.
/// Unknown URLs fail with a 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, Result<String, FetchError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, body: &str) {
        self.responses.lock().unwrap().insert(url.to_string(), Ok(body.to_string()));
    }

    pub fn fail(&self, url: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(FetchError::Network("connection refused".into())));
    }

    /// Make `url` answer only after `delay` has elapsed.
    pub fn delay(&self, url: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(url.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }

    pub fn count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(u, _)| u == url).count()
    }

    /// When `url` was first requested.
    pub fn first_call_at(&self, url: &str) -> Option<Instant> {
        self.calls.lock().unwrap().iter().find(|(u, _)| u == url).map(|(_, at)| *at)
    }
}

#[async_trait]
impl FragmentFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), Instant::now()));
        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Status { status: 404, url: url.to_string() }))
    }
}

pub const SHELL: &str = r#"
<div id="alerts-container"></div>
<button id="launch-instance-button" data-toggle="popover">Launch instance</button>
<div id="instance-types-table-container"></div>
<table id="nodes-table">
  <tr><td>node001</td><td><a id="terminate-node001" data-toggle="confirmation">Terminate</a></td></tr>
</table>
"#;

/// Launch form laid out the historical way: radio, category, instance type.
pub const LAUNCH_FORM: &str = r#"
<table id="instance-types-table">
  <tr><td><input type="radio" name="launchConfigGroup" checked></td><td>General</td><td>t2.micro</td></tr>
  <tr><td><input type="radio" name="launchConfigGroup"></td><td>General</td><td>m5.large</td></tr>
</table>
<table id="zones-table">
  <tr><td><input type="radio" name="zoneGroup"></td><td>us-east-1a</td></tr>
  <tr><td><input type="radio" name="zoneGroup"></td><td>us-east-1b</td></tr>
</table>
<button class="btn-launch">Launch</button>
<button class="btn-spot">Spot bid</button>
<button class="btn-cancel-option">Cancel</button>
"#;

pub fn alert_html(id: &str, kind: &str, title: &str) -> String {
    format!(
        r#"<div class="alert alert-{kind} alert-dismissible" data-alert-id="{id}"><button type="button" class="close" data-dismiss="alert">&times;</button><strong class="alert-title">{title}</strong> <span class="alert-message">details</span></div>"#
    )
}
