//! The stateful pipeline protocol client.
//!
//! One logical session per client instance: each `execute` is a single
//! round-trip, and the transaction baton binds otherwise-stateless HTTP calls
//! to one server-side transaction. A client holding a live baton must not be
//! shared between concurrent callers; a statement from one caller would be
//! silently attached to the other's open transaction. Use one client per
//! request/transaction scope, or external mutual exclusion around
//! `begin`..`commit`/`rollback` spans.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, error};
use url::Url;

use super::config::PipelineConfig;
use super::params::Params;
use super::proto::{PipelineRequestBody, PipelineResponseBody, Step, WireResult};
use super::query::build_result_set;
use crate::error::PipelineMiddlewareError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Client for the remote `/v2/pipeline` endpoint.
#[derive(Debug)]
pub struct PipelineClient {
    http: reqwest::Client,
    endpoint: Url,
    enable_logging: bool,
    current_baton: Option<String>,
}

impl PipelineClient {
    /// Build a client from validated configuration.
    ///
    /// The bearer token and content type become default headers and the timeout
    /// is bound at client construction, so every request the client sends is
    /// uniformly authenticated and bounded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the auth token is not a valid header value or
    /// the HTTP client cannot be built.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineMiddlewareError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.auth_token))
            .map_err(|e| {
                PipelineMiddlewareError::ConfigError(format!("Invalid auth token: {e}"))
            })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                PipelineMiddlewareError::ConfigError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            enable_logging: config.enable_logging,
            current_baton: None,
        })
    }

    /// Whether a transaction baton is currently live.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.current_baton.is_some()
    }

    /// Post one batch of steps and decode the response.
    ///
    /// The stored baton, when present, is attached to the outgoing body; a baton
    /// in the response replaces it. Some servers keep a session open and return
    /// a baton even when the batch ended with a `close` step; that is tolerated,
    /// the fresh baton simply rides along to the next call.
    async fn send(
        &mut self,
        requests: Vec<Step>,
    ) -> Result<PipelineResponseBody, PipelineMiddlewareError> {
        let body = PipelineRequestBody {
            requests,
            baton: self.current_baton.clone(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PipelineMiddlewareError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        let decoded: PipelineResponseBody = serde_json::from_str(&text)
            .map_err(|e| PipelineMiddlewareError::ResponseError(e.to_string()))?;

        if let Some(baton) = &decoded.baton
            && !baton.is_empty()
        {
            self.current_baton = Some(baton.clone());
        }

        Ok(decoded)
    }

    /// Pull the first step's result out of a response, surfacing per-step errors.
    fn first_result(
        response: PipelineResponseBody,
    ) -> Result<Option<WireResult>, PipelineMiddlewareError> {
        let Some(step) = response.results.into_iter().next() else {
            return Ok(None);
        };
        if let Some(err) = step.error {
            return Err(PipelineMiddlewareError::ExecutionError(err.message));
        }
        Ok(step.response.and_then(|r| r.result))
    }

    /// Execute one statement and close the batch.
    ///
    /// Sends `[execute, close]`; when a transaction baton is live it rides along
    /// in the body, keeping the statement inside the open transaction.
    ///
    /// # Errors
    ///
    /// `TransportError` when the HTTP layer fails (including timeout),
    /// `ApiError` on a non-success status, `ResponseError` on an undecodable
    /// body, and `ExecutionError` when the server rejects the statement itself.
    pub async fn execute(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, PipelineMiddlewareError> {
        if self.enable_logging {
            debug!(sql, "pipeline execute");
        }

        let args = if params.is_empty() {
            None
        } else {
            Some(Params::convert(params).into_vec())
        };

        let response = self
            .send(vec![Step::execute(sql, args), Step::Close])
            .await?;
        let result = Self::first_result(response)?;
        Ok(build_result_set(result))
    }

    /// Start a transaction; the response baton becomes the active session.
    ///
    /// No `close` step is sent, so the server keeps the session open. Failures
    /// are logged and reported as `false` rather than propagated; the adapter
    /// treats a failed transaction start as non-fatal and falls back to
    /// autocommit semantics.
    pub async fn begin(&mut self) -> bool {
        match self.send(vec![Step::execute("BEGIN TRANSACTION", None)]).await {
            Ok(response) => match Self::first_result(response) {
                Ok(_) => true,
                Err(e) => {
                    error!("transaction begin failed: {e}");
                    false
                }
            },
            Err(e) => {
                error!("transaction begin failed: {e}");
                false
            }
        }
    }

    /// Commit the open transaction. `false` when no baton is live or the
    /// round-trip fails.
    pub async fn commit(&mut self) -> bool {
        self.end_transaction("COMMIT").await
    }

    /// Roll back the open transaction. `false` when no baton is live or the
    /// round-trip fails.
    pub async fn rollback(&mut self) -> bool {
        self.end_transaction("ROLLBACK").await
    }

    async fn end_transaction(&mut self, sql: &str) -> bool {
        if self.current_baton.is_none() {
            error!(
                "transaction {sql} failed: {}",
                PipelineMiddlewareError::NoActiveTransaction
            );
            return false;
        }

        let outcome = self.send(vec![Step::execute(sql, None), Step::Close]).await;
        // Clearing local state is the authoritative signal of transaction end,
        // independent of what the server's response contained.
        self.current_baton = None;

        match outcome.map(Self::first_result) {
            Ok(Ok(_)) => true,
            Ok(Err(e)) | Err(e) => {
                error!("transaction {sql} failed: {e}");
                false
            }
        }
    }

    /// Verify the endpoint is reachable and answering queries.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` wrapping whatever made `SELECT 1` fail.
    pub async fn connect_check(&mut self) -> Result<(), PipelineMiddlewareError> {
        self.execute("SELECT 1", &[]).await.map(|_| ()).map_err(|e| {
            PipelineMiddlewareError::ConnectionError(format!(
                "Failed to reach pipeline endpoint: {e}"
            ))
        })
    }
}
