//! Single-shot invocation of the remote `exec_sql` procedure.

use crate::config::{GatewayConfig, Role};
use crate::error::{ConfigError, GatewayError};
use serde_json::{json, Value};
use std::time::Duration;

/// Longest slice of an error body carried into logs and failure reports.
const BODY_PREVIEW_LEN: usize = 200;

pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_LEN).collect()
}

/// Stateless request/response client for the remote procedure endpoint. Holds
/// only the immutable configuration and a pooled HTTP client; no retries, one
/// attempt per call.
#[derive(Clone)]
pub struct RpcInvoker {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl RpcInvoker {
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// POST the translated statement to `{base}/rest/v1/rpc/exec_sql` and
    /// return the decoded JSON body. Outcomes other than a decodable 200 are
    /// classified per [`GatewayError`].
    pub async fn call(
        &self,
        sql: &str,
        role: Role,
        timeout: Duration,
    ) -> Result<Value, GatewayError> {
        let url = format!("{}/rest/v1/rpc/exec_sql", self.config.base_url());
        let api_key = self.config.api_key(role).unwrap_or_default();
        tracing::debug!(url = %url, sql = %sql, "exec_sql");
        let response = self
            .http
            .post(&url)
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .header("Prefer", "return=representation")
            .json(&json!({ "sql": sql }))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if status != reqwest::StatusCode::OK {
            return Err(GatewayError::Response {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        serde_json::from_str(&body).map_err(|_| GatewayError::Decode(truncate_body(&body)))
    }

    /// GET the REST root with the given role's credentials; used by the
    /// endpoint health probe. Returns the status and a truncated body.
    pub async fn probe_rest_root(
        &self,
        role: Role,
        timeout: Duration,
    ) -> Result<(u16, String), GatewayError> {
        let url = format!("{}/rest/v1/", self.config.base_url());
        let api_key = self.config.api_key(role).unwrap_or_default();
        let response = self
            .http
            .get(&url)
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok((status, truncate_body(&body)))
    }
}
