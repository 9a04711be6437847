//! Values derived from model records by the query engine

use std::fmt;

use serde::Serialize;

/// A file installed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BaseFile {
    /// Path relative to the build tree
    pub source: String,
    /// Absolute path on the device
    pub dest: String,
}

impl BaseFile {
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// A file installed together with a stable symlink pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SymlinkedFile {
    pub source: String,
    pub dest: String,
    pub symlink: String,
}

impl SymlinkedFile {
    pub fn new(source: impl Into<String>, dest: impl Into<String>, symlink: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            symlink: symlink.into(),
        }
    }
}

/// Firmware facts of one model, with shared-model inheritance applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirmwareInfo {
    pub model: String,
    /// Model whose images this one ships (itself unless shared)
    pub shared_model: String,
    pub key_id: String,
    /// False for whitelabel variants without their own signed image
    pub have_image: bool,
    pub bios_build_target: Option<String>,
    pub ec_build_target: Option<String>,
    pub main_image_uri: String,
    pub main_rw_image_uri: String,
    pub ec_image_uri: String,
    pub pd_image_uri: String,
    pub sig_id: String,
    pub brand_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FirmwareImageType {
    Ap,
    Rw,
    Ec,
}

impl FirmwareImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ap => "ap",
            Self::Rw => "rw",
            Self::Ec => "ec",
        }
    }
}

impl fmt::Display for FirmwareImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One firmware image of a model and the target that builds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirmwareImage {
    #[serde(rename = "type")]
    pub ty: FirmwareImageType,
    pub build_target: String,
    pub image_uri: String,
}

/// Identity used by the signing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSignerInfo {
    pub key_id: String,
    pub sig_id: String,
}
