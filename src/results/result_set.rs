use std::collections::HashMap;
use std::sync::Arc;

use super::row::{DbRow, build_column_index};
use crate::types::RowValues;

/// A normalized result from one pipeline statement.
///
/// Carries both the row/column data of a SELECT and the DML metadata
/// (`rows_affected`, `last_insert_rowid`); statement classification decides
/// which side is authoritative. Produced per call and consumed immediately by
/// the adapter; not retained beyond that.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub rows: Vec<DbRow>,
    /// The number of rows affected (for DML statements)
    pub rows_affected: usize,
    /// Rowid of the last inserted row, when the statement produced one
    pub last_insert_rowid: Option<i64>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Set the column names shared by all rows of this result set.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(build_column_index(&column_names)));
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row; a no-op until column names have been set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(names), Some(index)) = (&self.column_names, &self.column_index) {
            self.rows
                .push(DbRow::with_index(names.clone(), index.clone(), row_values));
        }
    }
}
