use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// A single row from a query result.
///
/// Column names are shared across all rows of a result set; a prebuilt
/// name-to-index map keeps by-name access from degenerating into repeated
/// string scans.
#[derive(Debug, Clone)]
pub struct DbRow {
    /// The column names for this row (shared across the result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, positionally aligned with `column_names`
    pub values: Vec<RowValues>,
    pub(crate) column_index: Arc<HashMap<String, usize>>,
}

impl DbRow {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index = Arc::new(build_column_index(&column_names));
        Self {
            column_names,
            values,
            column_index,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get the index of a column by name.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index.get(column_name) {
            return Some(idx);
        }
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value by column name, or `None` if the column is unknown or the
    /// row is shorter than the column list.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value by column index.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }
}

pub(crate) fn build_column_index(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}
