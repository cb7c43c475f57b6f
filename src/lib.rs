//! MySQL-dialect compatibility middleware over the sqld HTTP pipeline protocol.
//!
//! Lets code written against a MySQL-flavored SQL interface run against a
//! remote, HTTP-accessed SQLite-compatible database: a best-effort dialect
//! translator, a printf-style statement preparer, a stateful pipeline client
//! that preserves transactional continuity across stateless HTTP calls via a
//! session baton, and a result mapper that restores traditional driver
//! semantics (affected rows, last insert id, row sets).

pub mod adapter;
pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod prepare;
pub mod results;
pub mod translation;
pub mod types;

pub use adapter::{DbAdapter, QueryOutcome};
pub use error::PipelineMiddlewareError;
pub use pipeline::{PipelineClient, PipelineConfig, PipelineOptions, PipelineOptionsBuilder};
pub use prepare::prepare_statement;
pub use results::{DbRow, ResultSet};
pub use translation::{references_found_rows, translate_mysql_to_sqlite};
pub use types::{RowValues, StatementKind};
