//! Wire types for the `/v2/pipeline` protocol.
//!
//! One HTTP call carries a batch of statement steps; the response carries one
//! entry per step plus an optional session baton binding the next call to the
//! same server-side transaction.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::params::TypedValue;

/// One statement in a pipeline request.
#[derive(Debug, Clone, Serialize)]
pub struct Stmt {
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<TypedValue>>,
}

/// A single step of a pipeline request.
///
/// An execution round-trip is a sequence of steps; callers append a trailing
/// `close` step when no long-lived transaction is desired and omit it when
/// keeping the session open.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Execute { stmt: Stmt },
    Close,
}

impl Step {
    #[must_use]
    pub fn execute(sql: impl Into<String>, args: Option<Vec<TypedValue>>) -> Self {
        Step::Execute {
            stmt: Stmt {
                sql: sql.into(),
                args,
            },
        }
    }
}

/// Request body posted to the pipeline endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRequestBody {
    pub requests: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baton: Option<String>,
}

/// Response body from the pipeline endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineResponseBody {
    #[serde(default)]
    pub results: Vec<StepResult>,
    #[serde(default)]
    pub baton: Option<String>,
}

/// Outcome of one step: either a response envelope or a per-step error.
#[derive(Debug, Clone, Deserialize)]
pub struct StepResult {
    #[serde(default)]
    pub response: Option<StepResponse>,
    #[serde(default)]
    pub error: Option<StepError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepResponse {
    #[serde(default)]
    pub result: Option<WireResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepError {
    pub message: String,
}

/// Raw result payload of an `execute` step.
///
/// `cols`/`rows` may be empty or absent for DDL and empty responses;
/// `last_insert_rowid` arrives as a decimal string, a number, or null
/// depending on server version.
#[derive(Debug, Clone, Deserialize)]
pub struct WireResult {
    #[serde(default)]
    pub cols: Vec<WireCol>,
    #[serde(default)]
    pub rows: Vec<Vec<TypedValue>>,
    #[serde(default)]
    pub affected_row_count: u64,
    #[serde(default, deserialize_with = "de_rowid")]
    pub last_insert_rowid: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCol {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowidRepr {
    Num(i64),
    Str(String),
}

fn de_rowid<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<RowidRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RowidRepr::Num(n)) => Ok(Some(n)),
        Some(RowidRepr::Str(s)) => s.parse().map(Some).map_err(D::Error::custom),
    }
}
