//! Typed model records
//!
//! One [`ModelRecord`] is one element of `chromeos.models` in the canonical
//! artifact. Every section is optional so that filtered artifacts, which lack
//! the build-only parts, load the same way as full ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelRecord {
    pub name: String,
    pub identity: Option<Identity>,
    pub brand_code: Option<String>,
    pub wallpaper: Option<String>,
    pub firmware: Option<Firmware>,
    pub firmware_signing: Option<FirmwareSigning>,
    pub audio: Option<Audio>,
    /// Touch devices keyed by `stylus`, `touchscreen@0`, ...
    #[serde(default)]
    pub touch: BTreeMap<String, TouchDevice>,
    pub thermal: Option<Thermal>,
    pub arc: Option<ArcFiles>,
}

impl ModelRecord {
    pub fn whitelabel_tag(&self) -> Option<&str> {
        self.identity.as_ref()?.whitelabel_tag.as_deref()
    }

    pub fn audio_main(&self) -> Option<&AudioMain> {
        self.audio.as_ref()?.main.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Identity {
    pub sku_id: Option<i64>,
    pub platform_name: Option<String>,
    pub smbios_name_match: Option<String>,
    pub customization_id: Option<String>,
    pub whitelabel_tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Firmware {
    pub bcs_overlay: Option<String>,
    pub build_targets: Option<BuildTargets>,
    pub main_image: Option<String>,
    pub main_rw_image: Option<String>,
    pub ec_image: Option<String>,
    pub pd_image: Option<String>,
    /// Model whose build targets and images this one reuses.
    pub shared_model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildTargets {
    pub coreboot: Option<String>,
    pub depthcharge: Option<String>,
    pub ec: Option<String>,
    pub libpayload: Option<String>,
    pub cr50: Option<String>,
    pub zephyr_ec: Option<String>,
    #[serde(default)]
    pub ec_extras: Vec<String>,
}

impl BuildTargets {
    /// Target for a build-target type as named in the config (`zephyr-ec`, ...).
    pub fn get(&self, target_type: &str) -> Option<&str> {
        match target_type {
            "coreboot" => self.coreboot.as_deref(),
            "depthcharge" => self.depthcharge.as_deref(),
            "ec" => self.ec.as_deref(),
            "libpayload" => self.libpayload.as_deref(),
            "cr50" => self.cr50.as_deref(),
            "zephyr-ec" => self.zephyr_ec.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FirmwareSigning {
    #[serde(default)]
    pub key_id: String,
    pub signature_id: Option<String>,
    #[serde(default)]
    pub sig_id_in_customization_id: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    pub main: Option<AudioMain>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AudioMain {
    pub card: Option<String>,
    pub cras_config_dir: Option<String>,
    pub ucm_suffix: Option<String>,
    pub topology_name: Option<String>,
    #[serde(default)]
    pub files: Vec<SystemFile>,
}

/// A file copied from the build tree to a fixed place on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFile {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TouchDevice {
    pub vendor: Option<String>,
    pub firmware_bin: String,
    pub firmware_symlink: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Thermal {
    pub dptf_dv: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArcFiles {
    pub hw_features: Option<SystemFile>,
    pub media_profiles: Option<SystemFile>,
}
