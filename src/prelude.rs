//! Convenience re-exports for common usage.
//!
//! ```rust
//! use pipeline_middleware::prelude::*;
//! ```

pub use crate::adapter::{DbAdapter, QueryOutcome};
pub use crate::error::PipelineMiddlewareError;
pub use crate::pipeline::{
    Params, PipelineClient, PipelineConfig, PipelineOptions, PipelineOptionsBuilder, TypedValue,
};
pub use crate::prepare::prepare_statement;
pub use crate::results::{DbRow, ResultSet};
pub use crate::translation::{references_found_rows, translate_mysql_to_sqlite};
pub use crate::types::{RowValues, StatementKind};
