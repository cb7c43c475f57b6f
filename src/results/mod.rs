// Results module - normalized query results shared across the crate
//
// - result_set: ResultSet with shared column names and DML metadata
// - row: DbRow with by-name and by-index access

mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::DbRow;
