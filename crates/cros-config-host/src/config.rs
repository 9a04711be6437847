//! Loading a flattened config and answering per-model queries

use std::collections::BTreeMap;
use std::path::Path;

use cros_config_fs::SourceFormat;
use serde_json::Value;

use crate::files;
use crate::model::ModelRecord;
use crate::tree::FileTreeNode;
use crate::types::{BaseFile, SymlinkedFile};
use crate::{Error, Result};

/// Decoder for compiled device-tree blobs.
///
/// Compiling and decoding device trees is left to the embedding program;
/// the decoder turns a blob back into the canonical JSON document.
pub trait BlobDecoder {
    fn decode(&self, blob: &[u8]) -> Result<Value>;
}

/// One SKU record, typed for queries and raw for property lookup.
#[derive(Debug, Clone)]
pub(crate) struct Record {
    pub(crate) typed: ModelRecord,
    pub(crate) raw: Value,
}

/// A loaded config, with records grouped by model name.
///
/// Models are kept in name order; each model holds its records in the
/// order they appear in the artifact.
#[derive(Debug, Clone, Default)]
pub struct CrosConfig {
    models: BTreeMap<String, Vec<Record>>,
}

impl CrosConfig {
    /// Load from a canonical `{"chromeos": {"models": [...]}}` document.
    pub fn from_value(doc: &Value) -> Result<Self> {
        let records = doc
            .pointer("/chromeos/models")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::invalid_config("missing 'chromeos.models' list"))?;

        let mut models: BTreeMap<String, Vec<Record>> = BTreeMap::new();
        for (index, raw) in records.iter().enumerate() {
            let typed: ModelRecord = serde_json::from_value(raw.clone())
                .map_err(|e| Error::invalid_config(format!("model record {index}: {e}")))?;
            models.entry(typed.name.clone()).or_default().push(Record {
                typed,
                raw: raw.clone(),
            });
        }

        tracing::debug!(models = models.len(), records = records.len(), "Loaded config");
        Ok(Self { models })
    }

    /// Load from canonical JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(&serde_json::from_str(text)?)
    }

    /// Load from YAML source text, flattening it first.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let tree = cros_config_schema::parse_source(text)?;
        Self::from_value(&cros_config_schema::transform_tree(&tree)?)
    }

    /// Load from a device-tree blob through `decoder`.
    pub fn from_blob(blob: &[u8], decoder: &dyn BlobDecoder) -> Result<Self> {
        Self::from_value(&decoder.decode(blob)?)
    }

    /// Load from a file, or stdin for `-`, detecting the format.
    ///
    /// Device-tree blobs are recognised but rejected with
    /// [`Error::DeviceTreeBlob`]; use [`CrosConfig::from_blob`] for them.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = cros_config_fs::io::read_bytes(path)?;
        let format = SourceFormat::detect(path, &bytes);
        tracing::debug!(?path, %format, "Detected config format");

        if format == SourceFormat::DeviceTree {
            return Err(Error::DeviceTreeBlob);
        }
        let text = String::from_utf8(bytes).map_err(|_| cros_config_fs::Error::NotUtf8 {
            path: path.to_path_buf(),
        })?;
        match format {
            SourceFormat::Json => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    /// Model names, sorted.
    pub fn model_list(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    pub fn model(&self, name: &str) -> Result<ModelConfig<'_>> {
        let (name, records) =
            self.models
                .get_key_value(name)
                .ok_or_else(|| Error::ModelNotFound {
                    model: name.to_string(),
                })?;
        Ok(ModelConfig {
            config: self,
            name,
            records,
        })
    }

    /// Every model, in name order.
    pub fn models(&self) -> impl Iterator<Item = ModelConfig<'_>> {
        self.models.iter().map(|(name, records)| ModelConfig {
            config: self,
            name,
            records,
        })
    }

    pub fn get_property(&self, model: &str, path: &str, property: &str) -> Result<&Value> {
        self.model(model)?.get_property(path, property)
    }

    /// Audio files of all models, sorted by destination and deduplicated.
    pub fn audio_files(&self) -> Vec<BaseFile> {
        files::sort_base_files(self.models().flat_map(|m| m.audio_files()).collect())
    }

    /// Touch firmware files of all models.
    ///
    /// Models sharing the same firmware blob contribute it once.
    pub fn touch_firmware_files(&self) -> Vec<SymlinkedFile> {
        files::sort_symlinked_files(
            self.models()
                .flat_map(|m| m.touch_firmware_files())
                .collect(),
        )
    }

    pub fn thermal_files(&self) -> Vec<BaseFile> {
        files::sort_base_files(self.models().flat_map(|m| m.thermal_files()).collect())
    }

    pub fn arc_files(&self) -> Vec<BaseFile> {
        files::sort_base_files(self.models().flat_map(|m| m.arc_files()).collect())
    }

    /// Distinct wallpapers across all models, sorted.
    pub fn wallpaper_files(&self) -> Vec<String> {
        let mut wallpapers: Vec<String> =
            self.models().flat_map(|m| m.wallpaper_files()).collect();
        wallpapers.sort();
        wallpapers.dedup();
        wallpapers
    }

    /// Tree of every installed file destination.
    pub fn file_tree(&self) -> FileTreeNode {
        let audio = self.audio_files();
        let touch = self.touch_firmware_files();
        let thermal = self.thermal_files();
        let arc = self.arc_files();

        let dests = audio
            .iter()
            .chain(&thermal)
            .chain(&arc)
            .map(|f| f.dest.as_str())
            .chain(touch.iter().map(|f| f.dest.as_str()));
        FileTreeNode::from_paths(dests)
    }

    pub(crate) fn records(&self, model: &str) -> Option<&[Record]> {
        self.models.get(model).map(Vec::as_slice)
    }
}

/// Queries scoped to one model.
#[derive(Debug, Clone, Copy)]
pub struct ModelConfig<'a> {
    pub(crate) config: &'a CrosConfig,
    name: &'a str,
    records: &'a [Record],
}

impl<'a> ModelConfig<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The model's records in artifact order.
    pub fn records(&self) -> impl Iterator<Item = &'a ModelRecord> + use<'a> {
        self.records.iter().map(|r| &r.typed)
    }

    /// Value of `property` in the mapping at `path` (`/` or `/a/b`) of the
    /// model's first record.
    pub fn get_property(&self, path: &str, property: &str) -> Result<&'a Value> {
        let Some(first) = self.records.first() else {
            return Err(Error::ModelNotFound {
                model: self.name.to_string(),
            });
        };

        let mut node = &first.raw;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            node = node
                .get(part)
                .filter(|v| v.is_object())
                .ok_or_else(|| Error::PathNotFound {
                    model: self.name.to_string(),
                    path: path.to_string(),
                })?;
        }

        node.get(property).ok_or_else(|| Error::PropertyNotFound {
            model: self.name.to_string(),
            path: path.to_string(),
            property: property.to_string(),
        })
    }

    pub fn audio_files(&self) -> Vec<BaseFile> {
        files::sort_base_files(self.records().flat_map(files::audio_files).collect())
    }

    pub fn touch_firmware_files(&self) -> Vec<SymlinkedFile> {
        files::sort_symlinked_files(
            self.records()
                .flat_map(files::touch_firmware_files)
                .collect(),
        )
    }

    pub fn thermal_files(&self) -> Vec<BaseFile> {
        files::sort_base_files(self.records().flat_map(files::thermal_files).collect())
    }

    pub fn arc_files(&self) -> Vec<BaseFile> {
        files::sort_base_files(self.records().flat_map(files::arc_files).collect())
    }

    pub fn wallpaper_files(&self) -> Vec<String> {
        let mut wallpapers: Vec<String> = self
            .records()
            .filter_map(|r| r.wallpaper.clone())
            .collect();
        wallpapers.sort();
        wallpapers.dedup();
        wallpapers
    }
}
