use std::time::Duration;

use url::Url;

use crate::error::PipelineMiddlewareError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for configuring a pipeline connection, as supplied by the hosting
/// application's settings surface.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub database_url: String,
    pub auth_token: String,
    pub timeout: Duration,
    pub enable_logging: bool,
}

impl PipelineOptions {
    #[must_use]
    pub fn new(database_url: String, auth_token: String) -> Self {
        Self {
            database_url,
            auth_token,
            timeout: DEFAULT_TIMEOUT,
            enable_logging: false,
        }
    }
}

/// Fluent builder for pipeline options.
#[derive(Debug, Clone)]
pub struct PipelineOptionsBuilder {
    opts: PipelineOptions,
}

impl PipelineOptionsBuilder {
    #[must_use]
    pub fn new(database_url: String, auth_token: String) -> Self {
        Self {
            opts: PipelineOptions::new(database_url, auth_token),
        }
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    #[must_use]
    pub fn logging(mut self, enable_logging: bool) -> Self {
        self.opts.enable_logging = enable_logging;
        self
    }

    #[must_use]
    pub fn finish(self) -> PipelineOptions {
        self.opts
    }
}

/// Validated, normalized connection configuration. Immutable per client.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Full pipeline endpoint, `{base}/v2/pipeline`
    pub endpoint: Url,
    pub auth_token: String,
    pub timeout: Duration,
    pub enable_logging: bool,
}

impl PipelineConfig {
    /// Normalize and validate options.
    ///
    /// The `libsql://` URI scheme is rewritten to standard `https://` once, here;
    /// no request-time rewriting happens.
    ///
    /// # Errors
    ///
    /// Returns `PipelineMiddlewareError::ConfigError` when the URL or token is
    /// empty, or the normalized URL does not parse.
    pub fn from_options(opts: PipelineOptions) -> Result<Self, PipelineMiddlewareError> {
        if opts.database_url.trim().is_empty() || opts.auth_token.trim().is_empty() {
            return Err(PipelineMiddlewareError::ConfigError(
                "Database URL and auth token are required".to_string(),
            ));
        }

        let normalized = normalize_scheme(&opts.database_url);
        let base = normalized.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/v2/pipeline")).map_err(|e| {
            PipelineMiddlewareError::ConfigError(format!("Invalid database URL: {e}"))
        })?;

        Ok(Self {
            endpoint,
            auth_token: opts.auth_token,
            timeout: opts.timeout,
            enable_logging: opts.enable_logging,
        })
    }
}

fn normalize_scheme(url: &str) -> String {
    match url.strip_prefix("libsql://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}
