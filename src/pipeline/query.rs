use std::sync::Arc;

use super::params::decode_value;
use super::proto::WireResult;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Build a [`ResultSet`] from the raw result of an `execute` step.
///
/// Column names come from the column-descriptor list, each cell is unwrapped to
/// its bare scalar, and missing DML metadata defaults to `0`/`None`. An entirely
/// absent payload (a `close` step, or a DDL response without a result object)
/// maps to an empty result set rather than an error.
#[must_use]
pub fn build_result_set(result: Option<WireResult>) -> ResultSet {
    let Some(result) = result else {
        return ResultSet::default();
    };

    let mut result_set = ResultSet::with_capacity(result.rows.len());

    let cols: Vec<String> = result
        .cols
        .into_iter()
        .map(|col| col.name.unwrap_or_default())
        .collect();
    result_set.set_column_names(Arc::new(cols));

    for row in result.rows {
        let values: Vec<RowValues> = row.into_iter().map(decode_value).collect();
        result_set.add_row_values(values);
    }

    result_set.rows_affected = usize::try_from(result.affected_row_count).unwrap_or(usize::MAX);
    result_set.last_insert_rowid = result.last_insert_rowid;

    result_set
}
