//! Command implementations for the cros-config tools
//!
//! Each command writes its result to the given writer so the binaries can
//! hand in stdout and tests can capture the output.

pub mod doc;
pub mod query;
pub mod transform;

pub use doc::run_generate_doc;
pub use query::{QueryOptions, run_query};
pub use transform::run_transform;
