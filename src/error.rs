use thiserror::Error;

/// Errors produced by the pipeline middleware.
///
/// Transport and API failures propagate out of [`crate::pipeline::PipelineClient::execute`];
/// the transaction-bracketing calls (`begin`/`commit`/`rollback`) convert every error to a
/// boolean `false` at the public boundary instead, because callers treat transactional
/// bracketing as best-effort.
#[derive(Debug, Error)]
pub enum PipelineMiddlewareError {
    /// The HTTP layer itself failed (connect error, timeout, broken body stream).
    #[error(transparent)]
    TransportError(#[from] reqwest::Error),

    /// The remote service answered with a non-success HTTP status.
    #[error("API error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response body could not be decoded as a pipeline response.
    #[error("Malformed pipeline response: {0}")]
    ResponseError(String),

    /// `commit`/`rollback` was called with no open session baton.
    #[error("No active transaction")]
    NoActiveTransaction,

    /// A SQL construct with no translation path (e.g. `SELECT FOUND_ROWS()`).
    #[error("Unsupported SQL construct: {0}")]
    UnsupportedConstruct(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The remote service rejected an individual statement step.
    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}
