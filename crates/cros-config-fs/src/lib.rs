//! Filesystem layer for the cros-config tools
//!
//! Reads configuration sources (files or stdin), detects their format and
//! writes derived artifacts atomically.

pub mod error;
pub mod format;
pub mod io;

pub use error::{Error, Result};
pub use format::SourceFormat;
pub use io::STDIN_PATH;
