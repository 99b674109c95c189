//! Normalization of the heterogeneous `exec_sql` response shapes into the
//! cursor-like contract: ordered row tuples for reads, an affected-count or
//! error record for writes. This stage never fails; unrecognized shapes
//! collapse to the benign default for the statement kind.

use crate::sql::QueryKind;
use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which some deployments nest the procedure result, as
/// `[{"exec_sql": ...}]`.
const WRAPPER_KEY: &str = "exec_sql";

/// One result row as an ordered tuple of column values.
pub type Row = Vec<Value>;

/// Closed classification of everything the remote procedure is known to
/// return. The one-element wrapper list is unwrapped during classification.
#[derive(Debug)]
pub enum RpcPayload {
    Null,
    /// A sequence of row mappings.
    Rows(Vec<Map<String, Value>>),
    /// A sequence of non-mapping values.
    Scalars(Vec<Value>),
    /// A single mapping: one row, a count record, or an error record.
    Mapping(Map<String, Value>),
    /// A bare scalar.
    Scalar(Value),
}

/// Outcome record for INSERT/UPDATE/DELETE and other non-reading statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WriteReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl WriteReport {
    pub fn counted(row_count: u64) -> Self {
        WriteReport {
            row_count: Some(row_count),
            ..WriteReport::default()
        }
    }

    pub fn failed(error: impl Into<String>, code: Option<String>, details: Option<String>) -> Self {
        WriteReport {
            row_count: None,
            error: Some(error.into()),
            code,
            details,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Kind-shaped normalized result: row tuples for `SELECT`, a [`WriteReport`]
/// for everything else. A no-result read is an empty sequence, never null.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Rows(Vec<Row>),
    Write(WriteReport),
}

impl QueryResult {
    /// Row tuples of a read result; empty for writes.
    pub fn rows(&self) -> &[Row] {
        match self {
            QueryResult::Rows(rows) => rows,
            QueryResult::Write(_) => &[],
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryResult::Rows(rows) => rows,
            QueryResult::Write(_) => Vec::new(),
        }
    }

    pub fn write(&self) -> Option<&WriteReport> {
        match self {
            QueryResult::Rows(_) => None,
            QueryResult::Write(report) => Some(report),
        }
    }
}

fn unwrap_nested(raw: Value) -> Value {
    match raw {
        Value::Array(mut items) if items.len() == 1 => match items.pop() {
            Some(Value::Object(mut map)) if map.contains_key(WRAPPER_KEY) => {
                map.remove(WRAPPER_KEY).unwrap_or(Value::Null)
            }
            Some(other) => Value::Array(vec![other]),
            None => Value::Array(Vec::new()),
        },
        other => other,
    }
}

/// Classify a raw response body. Lists are classified by their first element,
/// mirroring how the remote emits homogeneous result sets.
pub fn classify(raw: Value) -> RpcPayload {
    match unwrap_nested(raw) {
        Value::Null => RpcPayload::Null,
        Value::Array(items) => {
            if items.first().map_or(false, Value::is_object) {
                let rows = items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(map) => map,
                        _ => Map::new(),
                    })
                    .collect();
                RpcPayload::Rows(rows)
            } else {
                RpcPayload::Scalars(items)
            }
        }
        Value::Object(map) => RpcPayload::Mapping(map),
        other => RpcPayload::Scalar(other),
    }
}

/// Flatten one row mapping to a positional tuple. A mapping containing an
/// `id` key yields `id` first; the remaining columns keep arrival order.
fn row_tuple(row: Map<String, Value>) -> Row {
    let has_id = row.contains_key("id");
    let mut tuple = Vec::with_capacity(row.len());
    let mut rest = Vec::with_capacity(row.len());
    for (key, value) in row {
        if has_id && key == "id" {
            tuple.push(value);
        } else {
            rest.push(value);
        }
    }
    tuple.extend(rest);
    tuple
}

fn select_rows(payload: RpcPayload) -> Vec<Row> {
    match payload {
        RpcPayload::Null => Vec::new(),
        RpcPayload::Rows(rows) => rows.into_iter().map(row_tuple).collect(),
        RpcPayload::Scalars(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Array(tuple) => tuple,
                other => vec![other],
            })
            .collect(),
        // an error record decoded fine; a read treats it as silent emptiness
        RpcPayload::Mapping(map) if map.contains_key("error") => Vec::new(),
        RpcPayload::Mapping(map) => vec![row_tuple(map)],
        RpcPayload::Scalar(value) => vec![vec![value]],
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_outcome(payload: RpcPayload) -> WriteReport {
    match payload {
        RpcPayload::Mapping(map) => {
            if let Some(count) = map.get("row_count").and_then(Value::as_u64) {
                WriteReport::counted(count)
            } else if let Some(error) = map.get("error") {
                WriteReport::failed(value_text(error), map.get("code").map(value_text), None)
            } else {
                WriteReport::counted(0)
            }
        }
        _ => WriteReport::counted(0),
    }
}

/// Convert a decoded response into the kind-appropriate result.
pub fn normalize(raw: Value, kind: QueryKind) -> QueryResult {
    let payload = classify(raw);
    if kind.is_select() {
        QueryResult::Rows(select_rows(payload))
    } else {
        QueryResult::Write(write_outcome(payload))
    }
}
