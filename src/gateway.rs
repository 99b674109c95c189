//! Gateway façade: translate, qualify, substitute, invoke, normalize.

use crate::config::{GatewayConfig, Role};
use crate::error::{ConfigError, GatewayError};
use crate::normalize::{normalize, QueryResult, Row, WriteReport};
use crate::rpc::RpcInvoker;
use crate::sql::{qualify_tables, substitute_params, translate_dialect, QueryKind};
use serde_json::Value;
use std::time::Duration;

/// Result of one [`Gateway::execute`] call: the benign normalized value plus
/// the classified failure cause when a stage failed. CRUD callers read
/// `result` and see the cursor-like contract; tests and diagnostics can also
/// observe `failure` to tell a truly empty result from a failed call.
#[derive(Debug)]
pub struct Execution {
    pub result: QueryResult,
    pub failure: Option<GatewayError>,
}

impl Execution {
    /// Row tuples of a read result; empty for writes and failed reads.
    pub fn rows(&self) -> &[Row] {
        self.result.rows()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.result.into_rows()
    }

    /// The write outcome record, when the statement was not a read.
    pub fn write(&self) -> Option<&WriteReport> {
        self.result.write()
    }

    /// True when the statement was a write and its report carries no error.
    pub fn write_ok(&self) -> bool {
        self.write().map_or(false, WriteReport::is_ok)
    }
}

/// Outcome of probing the REST root with the configured credentials.
#[derive(Debug)]
pub struct HealthReport {
    pub status: u16,
    pub body: String,
}

impl HealthReport {
    /// The endpoint answered in a way that proves basic REST access; 404/406
    /// count because the probed root legitimately returns them.
    pub fn reachable(&self) -> bool {
        matches!(self.status, 200 | 404 | 406)
    }

    pub fn credential_ok(&self) -> bool {
        !(self.status == 401 && self.body.contains("Invalid API key"))
    }
}

/// Entry point for remote query execution. Owns the immutable configuration
/// and the HTTP invoker; safe to share across tasks, no cross-call state.
#[derive(Clone)]
pub struct Gateway {
    config: GatewayConfig,
    rpc: RpcInvoker,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let rpc = RpcInvoker::new(config.clone())?;
        Ok(Self { config, rpc })
    }

    /// Build a gateway from the process environment (see
    /// [`crate::config::from_env`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(crate::config::from_env()?)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Execute with the elevated role and the configured default timeout.
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Execution {
        self.execute_as(sql, params, Role::Service, self.config.timeout())
            .await
    }

    /// Execute one statement: dialect translation, table qualification and
    /// parameter substitution run in that order, the result is sent as a
    /// single remote procedure call, and the response is normalized into the
    /// kind-appropriate shape. Never fails: a classified failure is logged
    /// and converted into the benign default, with the cause kept on the
    /// returned [`Execution`].
    pub async fn execute_as(
        &self,
        sql: &str,
        params: &[Value],
        role: Role,
        timeout: Duration,
    ) -> Execution {
        let kind = QueryKind::of(sql);
        let translated = translate_dialect(sql);
        let qualified = qualify_tables(&translated);
        let statement = substitute_params(&qualified, params);

        match self.rpc.call(&statement, role, timeout).await {
            Ok(raw) => Execution {
                result: normalize(raw, kind),
                failure: None,
            },
            Err(err) => {
                tracing::error!(kind = ?kind, error = %err, sql = %statement, "exec_sql failed");
                Execution {
                    result: default_for(kind, &err),
                    failure: Some(err),
                }
            }
        }
    }

    /// Probe the REST root with the elevated credentials.
    pub async fn health_check(&self) -> Result<HealthReport, GatewayError> {
        let (status, body) = self
            .rpc
            .probe_rest_root(Role::Service, self.config.timeout())
            .await?;
        Ok(HealthReport { status, body })
    }
}

/// Benign default for a failed call: empty rows for reads, an error-bearing
/// report for writes.
fn default_for(kind: QueryKind, err: &GatewayError) -> QueryResult {
    if kind.is_select() {
        return QueryResult::Rows(Vec::new());
    }
    let report = match err {
        GatewayError::Response { status, body } => {
            WriteReport::failed(format!("http {}", status), None, Some(body.clone()))
        }
        GatewayError::Decode(body) => {
            WriteReport::failed("invalid-json", None, Some(body.clone()))
        }
        GatewayError::Transport(message) | GatewayError::Normalization(message) => {
            WriteReport::failed(message.clone(), None, None)
        }
    };
    QueryResult::Write(report)
}
