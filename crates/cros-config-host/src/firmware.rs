//! Firmware derivation with shared-model inheritance

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{CrosConfig, ModelConfig};
use crate::model::{BuildTargets, Firmware, FirmwareSigning, ModelRecord};
use crate::types::{DeviceSignerInfo, FirmwareImage, FirmwareImageType, FirmwareInfo};
use crate::{Error, Result};

const GS_BUCKET: &str = "gs://chromeos-binaries/HOME";
const BCS_PREFIX: &str = "bcs://";
const OVERLAY_PREFIX: &str = "overlay-";

/// `sig_id` of models whose signature id is read from the customization id.
pub const SIG_ID_IN_CUSTOMIZATION_ID: &str = "sig-id-in-customization-id";

/// Firmware a model ships: its own, or that of the model it shares with.
struct SharedFirmware<'a> {
    shared_model: &'a str,
    firmware: &'a Firmware,
}

/// Remote location of a firmware image in BCS.
pub fn firmware_uri(overlay: &str, build_target: &str, image: &str) -> String {
    let overlay = overlay.strip_prefix(OVERLAY_PREFIX).unwrap_or(overlay);
    let file = image.strip_prefix(BCS_PREFIX).unwrap_or(image);
    format!(
        "{GS_BUCKET}/bcs-{overlay}/{OVERLAY_PREFIX}{overlay}/chromeos-base/chromeos-firmware-{build_target}/{file}"
    )
}

impl CrosConfig {
    /// The first record of `model` that carries a firmware block.
    fn firmware_record(&self, model: &str) -> Option<&ModelRecord> {
        self.records(model)?
            .iter()
            .map(|r| &r.typed)
            .find(|r| r.firmware.is_some())
    }

    /// Follow `shared-model` links to the model whose firmware `model` ships.
    fn shared_firmware(&self, model: &str) -> Result<Option<SharedFirmware<'_>>> {
        let Some(record) = self.firmware_record(model) else {
            return Ok(None);
        };
        let Some(mut firmware) = record.firmware.as_ref() else {
            return Ok(None);
        };

        let mut current = record.name.as_str();
        let mut seen = vec![current];
        while let Some(shared) = firmware.shared_model.as_deref().filter(|s| *s != current) {
            if seen.contains(&shared) {
                return Err(Error::invalid_config(format!(
                    "shared-model cycle through {}",
                    seen.join(" -> ")
                )));
            }
            firmware = self
                .firmware_record(shared)
                .and_then(|r| r.firmware.as_ref())
                .ok_or_else(|| Error::SharedModelNotFound {
                    model: current.to_string(),
                    shared_model: shared.to_string(),
                })?;
            seen.push(shared);
            current = shared;
        }

        Ok(Some(SharedFirmware {
            shared_model: current,
            firmware,
        }))
    }

    /// Firmware facts of every model that has a firmware block.
    pub fn firmware_info(&self) -> Result<BTreeMap<String, FirmwareInfo>> {
        let mut info = BTreeMap::new();
        for model in self.models() {
            if let Some(model_info) = model.firmware_info()? {
                info.insert(model.name().to_string(), model_info);
            }
        }
        Ok(info)
    }

    /// Firmware URIs of every model that ships its own firmware, sorted.
    pub fn firmware_uris(&self) -> Result<Vec<String>> {
        let mut uris = Vec::new();
        for model in self.models() {
            if self.ships_own_firmware(model.name())? {
                uris.extend(model.firmware_uris()?);
            }
        }
        uris.sort();
        Ok(uris)
    }

    /// Images of every model that ships its own firmware, in `ap`, `rw`,
    /// `ec` order. Image types without a URI are left out.
    pub fn firmware_configs(&self) -> Result<BTreeMap<String, Vec<FirmwareImage>>> {
        let mut configs = BTreeMap::new();
        for (name, info) in self.firmware_info()? {
            if info.shared_model != name {
                continue;
            }
            let bios = info.bios_build_target.clone().unwrap_or_default();
            let ec = info.ec_build_target.clone().unwrap_or_default();
            let images = [
                (FirmwareImageType::Ap, bios.clone(), info.main_image_uri),
                (FirmwareImageType::Rw, bios, info.main_rw_image_uri),
                (FirmwareImageType::Ec, ec, info.ec_image_uri),
            ]
            .into_iter()
            .filter(|(_, _, uri)| !uri.is_empty())
            .map(|(ty, build_target, image_uri)| FirmwareImage {
                ty,
                build_target,
                image_uri,
            })
            .collect();
            configs.insert(name, images);
        }
        Ok(configs)
    }

    /// Model name → the model whose firmware config it uses.
    pub fn firmware_configs_by_device(&self) -> Result<BTreeMap<String, String>> {
        Ok(self
            .firmware_info()?
            .into_iter()
            .map(|(name, info)| (name, info.shared_model))
            .collect())
    }

    /// Distinct targets of `target_type` across models, sorted.
    ///
    /// `fw_name` restricts the query to that one model. The `ec` type also
    /// includes each model's `ec-extras`.
    pub fn firmware_build_targets(
        &self,
        target_type: &str,
        fw_name: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut targets = BTreeSet::new();
        for model in self.models() {
            if fw_name.is_some_and(|n| n != model.name()) {
                continue;
            }
            let Some(build_targets) = self.build_targets(model.name())? else {
                continue;
            };
            if let Some(target) = build_targets.get(target_type) {
                targets.insert(target.to_string());
            }
            if target_type == "ec" {
                targets.extend(build_targets.ec_extras.iter().cloned());
            }
        }
        Ok(targets.into_iter().collect())
    }

    /// One row per model that ships its own firmware, holding its target
    /// for each of `target_types` in order (`None` when it has none).
    pub fn firmware_build_combinations(
        &self,
        target_types: &[&str],
        fw_name: Option<&str>,
    ) -> Result<BTreeMap<String, Vec<Option<String>>>> {
        let mut combinations = BTreeMap::new();
        for model in self.models() {
            let name = model.name();
            if fw_name.is_some_and(|n| n != name) || !self.ships_own_firmware(name)? {
                continue;
            }
            let build_targets = self.build_targets(name)?;
            let row = target_types
                .iter()
                .map(|ty| build_targets.and_then(|bt| bt.get(ty)).map(str::to_string))
                .collect();
            combinations.insert(name.to_string(), row);
        }
        Ok(combinations)
    }

    /// Signing identity of every model that has a firmware block.
    pub fn device_signer_info(&self) -> Result<BTreeMap<String, DeviceSignerInfo>> {
        Ok(self
            .firmware_info()?
            .into_iter()
            .map(|(name, info)| {
                (
                    name,
                    DeviceSignerInfo {
                        key_id: info.key_id,
                        sig_id: info.sig_id,
                    },
                )
            })
            .collect())
    }

    fn build_targets(&self, model: &str) -> Result<Option<&BuildTargets>> {
        Ok(self
            .shared_firmware(model)?
            .and_then(|s| s.firmware.build_targets.as_ref()))
    }

    fn ships_own_firmware(&self, model: &str) -> Result<bool> {
        Ok(self
            .shared_firmware(model)?
            .is_some_and(|s| s.shared_model == model))
    }
}

impl ModelConfig<'_> {
    /// Firmware facts of this model, or `None` without a firmware block.
    pub fn firmware_info(&self) -> Result<Option<FirmwareInfo>> {
        let name = self.name();
        let Some(shared) = self.config.shared_firmware(name)? else {
            return Ok(None);
        };
        let Some(record) = self.config.firmware_record(name) else {
            return Ok(None);
        };

        let firmware = shared.firmware;
        let targets = firmware.build_targets.as_ref();
        let signing = record.firmware_signing.as_ref();
        let sig_id = match signing {
            Some(FirmwareSigning {
                signature_id: Some(id),
                ..
            }) => id.clone(),
            Some(s) if s.sig_id_in_customization_id => SIG_ID_IN_CUSTOMIZATION_ID.to_string(),
            _ => name.to_string(),
        };

        Ok(Some(FirmwareInfo {
            model: name.to_string(),
            shared_model: shared.shared_model.to_string(),
            key_id: signing.map(|s| s.key_id.clone()).unwrap_or_default(),
            have_image: record.whitelabel_tag().is_none(),
            bios_build_target: targets.and_then(|t| t.coreboot.clone()),
            ec_build_target: targets.and_then(|t| t.ec.clone()),
            main_image_uri: firmware.main_image.clone().unwrap_or_default(),
            main_rw_image_uri: firmware.main_rw_image.clone().unwrap_or_default(),
            ec_image_uri: firmware.ec_image.clone().unwrap_or_default(),
            pd_image_uri: firmware.pd_image.clone().unwrap_or_default(),
            sig_id,
            brand_code: record.brand_code.clone().unwrap_or_default(),
        }))
    }

    /// Remote URIs of the firmware images this model ships, sorted.
    ///
    /// Empty when the firmware has no BCS overlay or no coreboot target.
    pub fn firmware_uris(&self) -> Result<Vec<String>> {
        let Some(shared) = self.config.shared_firmware(self.name())? else {
            return Ok(Vec::new());
        };
        let firmware = shared.firmware;
        let (Some(overlay), Some(target)) = (
            firmware.bcs_overlay.as_deref(),
            firmware
                .build_targets
                .as_ref()
                .and_then(|t| t.coreboot.as_deref()),
        ) else {
            return Ok(Vec::new());
        };

        let mut uris: Vec<String> = [
            &firmware.main_image,
            &firmware.main_rw_image,
            &firmware.ec_image,
            &firmware.pd_image,
        ]
        .into_iter()
        .flatten()
        .filter(|image| !image.is_empty())
        .map(|image| firmware_uri(overlay, target, image))
        .collect();
        uris.sort();
        Ok(uris)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(models: serde_json::Value) -> CrosConfig {
        CrosConfig::from_value(&json!({"chromeos": {"models": models}})).unwrap()
    }

    #[test]
    fn test_firmware_uri_strips_prefixes() {
        assert_eq!(
            firmware_uri("overlay-some-private", "some", "bcs://Some.1111.11.1.tbz2"),
            "gs://chromeos-binaries/HOME/bcs-some-private/overlay-some-private/chromeos-base/chromeos-firmware-some/Some.1111.11.1.tbz2"
        );
    }

    #[test]
    fn test_missing_overlay_means_no_uris() {
        let config = config(json!([{
            "name": "m",
            "firmware": {"build-targets": {"coreboot": "m"}, "main-image": "bcs://M.tbz2"}
        }]));
        assert!(config.model("m").unwrap().firmware_uris().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_shared_model() {
        let config = config(json!([{"name": "wl", "firmware": {"shared-model": "ghost"}}]));
        assert!(matches!(
            config.firmware_info(),
            Err(Error::SharedModelNotFound { ref shared_model, .. }) if shared_model == "ghost"
        ));
    }

    #[test]
    fn test_shared_model_chain_resolves_to_root() {
        let config = config(json!([
            {"name": "base", "firmware": {"build-targets": {"coreboot": "base"}}},
            {"name": "mid", "firmware": {"shared-model": "base"}},
            {"name": "leaf", "firmware": {"shared-model": "mid"}}
        ]));
        let info = config.firmware_info().unwrap();
        assert_eq!(info["leaf"].shared_model, "base");
        assert_eq!(info["leaf"].bios_build_target.as_deref(), Some("base"));
    }

    #[test]
    fn test_shared_model_cycle_is_invalid() {
        let config = config(json!([
            {"name": "a", "firmware": {"shared-model": "b"}},
            {"name": "b", "firmware": {"shared-model": "a"}}
        ]));
        assert!(matches!(
            config.firmware_info(),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_signature_id_overrides_name() {
        let config = config(json!([{
            "name": "m",
            "firmware": {},
            "firmware-signing": {"key-id": "K", "signature-id": "custom", "sig-id-in-customization-id": true}
        }]));
        let signer = config.device_signer_info().unwrap();
        assert_eq!(
            signer["m"],
            DeviceSignerInfo {
                key_id: "K".into(),
                sig_id: "custom".into()
            }
        );
    }

    #[test]
    fn test_models_without_firmware_are_skipped() {
        let config = config(json!([{"name": "m"}]));
        assert!(config.firmware_info().unwrap().is_empty());
        assert!(config.firmware_configs().unwrap().is_empty());
        assert!(config.firmware_build_targets("coreboot", None).unwrap().is_empty());
    }
}
