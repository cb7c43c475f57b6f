//! Driver-shaped adapter facade.
//!
//! `DbAdapter` composes the dialect translator, the statement preparer and the
//! pipeline client into the synchronous-driver contract an ORM-like caller
//! expects: a `query(sql)` entry point plus out-of-band state (`last_query`,
//! `last_error`, `rows_affected`, `insert_id`, `last_result`, `num_rows`).
//! State is fully overwritten on every call, never merged.

use tracing::{debug, error, info};

use crate::error::PipelineMiddlewareError;
use crate::pipeline::config::{PipelineConfig, PipelineOptions};
use crate::pipeline::executor::PipelineClient;
use crate::prepare::prepare_statement;
use crate::results::{DbRow, ResultSet};
use crate::translation::{references_found_rows, translate_mysql_to_sqlite};
use crate::types::{RowValues, StatementKind};

/// What a `query` call produced, mirroring the bool-or-count return convention
/// of traditional synchronous drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// DDL, or a row-less response: the statement succeeded.
    Success,
    /// DML: number of affected rows.
    Affected(usize),
    /// SELECT: number of rows now held in `last_result`.
    Selected(usize),
    /// The statement failed; details are in `last_error`.
    Failed,
}

/// Adapter satisfying a synchronous driver contract over the pipeline client.
#[derive(Debug)]
pub struct DbAdapter {
    client: PipelineClient,
    /// The most recent SQL passed to `query`, pre-translation.
    pub last_query: String,
    /// Why the most recent `query` failed, if it did.
    pub last_error: Option<String>,
    /// Rows affected by the most recent DML statement.
    pub rows_affected: usize,
    /// Rowid produced by the most recent insert, `0` when none.
    pub insert_id: i64,
    /// The most recent SELECT result.
    pub last_result: Option<ResultSet>,
    /// Row count of `last_result`.
    pub num_rows: usize,
}

impl DbAdapter {
    /// Connect and verify the remote endpoint.
    ///
    /// A connection failure here is propagated so the hosting process can treat
    /// it as fatal; steady-state query failures later are reported per-call via
    /// [`DbAdapter::query`] instead.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for invalid options and `ConnectionError` when the
    /// endpoint does not answer `SELECT 1`.
    pub async fn connect(options: PipelineOptions) -> Result<Self, PipelineMiddlewareError> {
        let config = PipelineConfig::from_options(options)?;
        let mut client = PipelineClient::new(config)?;
        client.connect_check().await?;
        info!("pipeline adapter initialized");

        Ok(Self {
            client,
            last_query: String::new(),
            last_error: None,
            rows_affected: 0,
            insert_id: 0,
            last_result: None,
            num_rows: 0,
        })
    }

    /// Reset all per-call public state.
    pub fn flush(&mut self) {
        self.last_query.clear();
        self.last_error = None;
        self.rows_affected = 0;
        self.insert_id = 0;
        self.last_result = None;
        self.num_rows = 0;
    }

    /// Execute one statement, driver-style.
    ///
    /// Translates the MySQL-flavored SQL, classifies the translated statement by
    /// leading keyword, executes it, and updates the public state. Failures are
    /// recorded in `last_error` and reported as [`QueryOutcome::Failed`]; they
    /// never unwind, so the calling layer can log and continue.
    pub async fn query(&mut self, sql: &str) -> QueryOutcome {
        if sql.trim().is_empty() {
            return QueryOutcome::Failed;
        }

        self.flush();
        self.last_query = sql.to_string();
        debug!(original = sql, "query");

        let translated = translate_mysql_to_sqlite(sql).into_owned();
        debug!(%translated, "converted query");

        if references_found_rows(&translated) {
            let err = PipelineMiddlewareError::UnsupportedConstruct(
                "SELECT FOUND_ROWS() has no SQLite equivalent".to_string(),
            );
            error!("query error: {err}");
            self.last_error = Some(err.to_string());
            return QueryOutcome::Failed;
        }

        let result = match self.client.execute(&translated, &[]).await {
            Ok(result) => result,
            Err(e) => {
                self.last_error = Some(e.to_string());
                error!("query error: {e}");
                error!("failed query: {translated}");
                return QueryOutcome::Failed;
            }
        };

        match StatementKind::classify(&translated) {
            StatementKind::Ddl => {
                debug!("DDL query executed successfully");
                QueryOutcome::Success
            }
            StatementKind::Dml => {
                self.rows_affected = result.rows_affected;
                self.insert_id = result.last_insert_rowid.unwrap_or(0);
                debug!(rows = self.rows_affected, "DML query affected rows");
                QueryOutcome::Affected(self.rows_affected)
            }
            StatementKind::Select => {
                if result.rows.is_empty() {
                    return QueryOutcome::Success;
                }
                self.num_rows = result.rows.len();
                debug!(rows = self.num_rows, "SELECT query returned rows");
                self.last_result = Some(result);
                QueryOutcome::Selected(self.num_rows)
            }
        }
    }

    /// Substitute printf-style placeholders; see [`prepare_statement`].
    #[must_use]
    pub fn prepare(&self, template: &str, args: &[RowValues]) -> String {
        let prepared = prepare_statement(template, args);
        debug!(template, prepared = %prepared, "prepared query");
        prepared
    }

    /// Fetch the first row of a typed-parameter query.
    ///
    /// This is the injection-safe path: parameters travel as tagged wire values,
    /// not inline literals.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineMiddlewareError`] from the client.
    pub async fn get_row(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<Option<DbRow>, PipelineMiddlewareError> {
        let translated = translate_mysql_to_sqlite(sql);
        let result = self.client.execute(&translated, params).await?;
        Ok(result.rows.into_iter().next())
    }

    /// Fetch the first scalar of a typed-parameter query.
    ///
    /// # Errors
    ///
    /// Propagates any [`PipelineMiddlewareError`] from the client.
    pub async fn get_var(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<Option<RowValues>, PipelineMiddlewareError> {
        let row = self.get_row(sql, params).await?;
        Ok(row.and_then(|r| r.values.into_iter().next()))
    }

    /// Best-effort transaction start; see [`PipelineClient::begin`].
    pub async fn begin_transaction(&mut self) -> bool {
        self.client.begin().await
    }

    /// Best-effort commit; `false` with no open transaction.
    pub async fn commit(&mut self) -> bool {
        self.client.commit().await
    }

    /// Best-effort rollback; `false` with no open transaction.
    pub async fn rollback(&mut self) -> bool {
        self.client.rollback().await
    }

    /// Whether a transaction baton is currently live.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.client.in_transaction()
    }
}
