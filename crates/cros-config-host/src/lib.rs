//! Resolution and query engine over flattened cros-config artifacts.
//!
//! [`CrosConfig`] loads the canonical `{"chromeos": {"models": [...]}}`
//! document (or a YAML source, flattened on load), groups its records by
//! model name and derives firmware assignments, install manifests and a
//! packaging file tree from them.

pub mod config;
pub mod error;
pub mod files;
pub mod firmware;
pub mod model;
pub mod tree;
pub mod types;

pub use config::{BlobDecoder, CrosConfig, ModelConfig};
pub use error::{Error, Result};
pub use firmware::{SIG_ID_IN_CUSTOMIZATION_ID, firmware_uri};
pub use model::ModelRecord;
pub use tree::{FileTreeNode, show_tree};
pub use types::{
    BaseFile, DeviceSignerInfo, FirmwareImage, FirmwareImageType, FirmwareInfo, SymlinkedFile,
};
