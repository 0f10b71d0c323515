// Spreadsheet web-app gateway
use crate::application::sheet_repository::SheetRepository;
use crate::domain::snapshot::DashboardSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("could not reach the sheet endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {}", .0.as_u16())]
    Status(reqwest::StatusCode),
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub struct SheetGateway {
    base_url: String,
    client: reqwest::Client,
}

impl SheetGateway {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    // cache-busting timestamp keeps intermediaries from replaying stale data
    fn read_url(&self) -> String {
        format!(
            "{}?t={}",
            self.base_url,
            chrono::Utc::now().timestamp_millis()
        )
    }

    fn write_url(&self, token: &str) -> String {
        format!("{}?token={}", self.base_url, urlencoding::encode(token))
    }
}

#[async_trait]
impl SheetRepository for SheetGateway {
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot> {
        let url = self.read_url();
        tracing::debug!("fetching sheet snapshot from {url}");

        let response = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(SheetError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::Status(status).into());
        }

        let body: Value = response
            .json()
            .await
            .context("failed to parse sheet response")?;

        if body.get("error").is_some_and(is_truthy) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown backend failure");
            return Err(SheetError::Backend(format!("Backend Error: {message}")).into());
        }

        serde_json::from_value(body).context("unexpected sheet snapshot shape")
    }

    async fn submit_record(&self, payload: &Value, token: &str) -> Result<()> {
        let body = serde_json::to_string(payload).context("failed to encode record payload")?;

        // the endpoint only accepts non-preflighted content types
        let response = self
            .client
            .post(self.write_url(token))
            .header(header::CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(SheetError::Transport)?;

        let status = response.status();
        let parsed: Option<Value> = match response.text().await {
            Ok(text) => serde_json::from_str(&text).ok(),
            Err(_) => None,
        };

        let rejected = parsed
            .as_ref()
            .and_then(|body| body.get("ok"))
            .and_then(Value::as_bool)
            == Some(false);

        if !status.is_success() || rejected {
            if let Some(message) = parsed.as_ref().and_then(failure_message) {
                return Err(SheetError::Backend(message).into());
            }
            return Err(SheetError::Status(status).into());
        }

        Ok(())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn failure_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
