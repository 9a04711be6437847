//! Command-line tools for cros-config.
//!
//! Three binaries share this library:
//!
//! - `cros_config_schema` flattens and validates a source into the
//!   canonical JSON artifact
//! - `cros_config_host` answers queries against an artifact or source
//! - `generate_schema_doc` renders the schema as Markdown tables

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use error::{CliError, Result};
