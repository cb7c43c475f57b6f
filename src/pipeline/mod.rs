// Pipeline module - the remote sqld `/v2/pipeline` protocol
//
// Structured the same way as a database backend directory:
// - config: endpoint/credential configuration and URL normalization
// - proto: wire request/response types
// - params: typed parameter codec between RowValues and wire values
// - query: result mapping from wire results to ResultSet
// - executor: the stateful protocol client (execute / begin / commit / rollback)

pub mod config;
pub mod executor;
pub mod params;
pub mod proto;
pub mod query;

pub use config::{PipelineConfig, PipelineOptions, PipelineOptionsBuilder};
pub use executor::PipelineClient;
pub use params::{Params, TypedValue};
pub use query::build_result_set;
