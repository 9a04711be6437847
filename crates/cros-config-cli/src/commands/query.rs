//! Query commands over a loaded config

use std::collections::BTreeMap;
use std::io::Write;

use cros_config_host::{BaseFile, CrosConfig, ModelConfig, SymlinkedFile, show_tree};
use serde::Serialize;
use serde_json::Value;

use crate::cli::HostCommand;
use crate::error::{CliError, Result};

/// Model selection shared by every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions<'a> {
    /// Scope to one model
    pub model: Option<&'a str>,
    /// Run per-model queries for every model
    pub all_models: bool,
    /// Restrict build-target queries to one model
    pub fw_name: Option<&'a str>,
}

impl<'a> QueryOptions<'a> {
    /// Model used to restrict firmware build queries; `fw_name` wins over
    /// `--model`.
    fn firmware_scope(&self) -> Option<&'a str> {
        self.fw_name.or(self.model)
    }
}

/// Run `command` against `config`, writing results to `out`.
pub fn run_query(
    config: &CrosConfig,
    command: &HostCommand,
    options: QueryOptions<'_>,
    out: &mut impl Write,
) -> Result<()> {
    tracing::debug!(?command, model = ?options.model, "Running query");
    let scoped = match options.model.map(|name| config.model(name)) {
        Some(Ok(model)) => Some(model),
        Some(Err(e)) if !e.is_not_found() => return Err(e.into()),
        // An unknown model is an absence for this query, not a failure.
        Some(Err(e)) if !matches!(command, HostCommand::ListModels) => {
            tracing::warn!("{e}");
            return Ok(());
        }
        Some(Err(_)) | None => None,
    };

    match command {
        HostCommand::ListModels => {
            for name in config.model_list() {
                writeln!(out, "{name}")?;
            }
        }
        HostCommand::Get { path, prop } => {
            let models: Vec<ModelConfig<'_>> = match scoped {
                Some(model) => vec![model],
                None if options.all_models => config.models().collect(),
                None => return Err(CliError::user("get requires --model or --all-models")),
            };
            for model in models {
                write_property(out, &model, path, prop)?;
            }
        }
        HostCommand::GetFirmwareUris => {
            let uris = match scoped {
                Some(model) => model.firmware_uris()?,
                None => config.firmware_uris()?,
            };
            for uri in uris {
                writeln!(out, "{uri}")?;
            }
        }
        HostCommand::GetTouchFirmwareFiles => {
            let files = match scoped {
                Some(model) => model.touch_firmware_files(),
                None => config.touch_firmware_files(),
            };
            write_symlinked_files(out, &files)?;
        }
        HostCommand::GetAudioFiles => {
            let files = match scoped {
                Some(model) => model.audio_files(),
                None => config.audio_files(),
            };
            write_files(out, &files)?;
        }
        HostCommand::GetArcFiles => {
            let files = match scoped {
                Some(model) => model.arc_files(),
                None => config.arc_files(),
            };
            write_files(out, &files)?;
        }
        HostCommand::GetThermalFiles => {
            let files = match scoped {
                Some(model) => model.thermal_files(),
                None => config.thermal_files(),
            };
            write_files(out, &files)?;
        }
        HostCommand::GetWallpaperFiles => {
            let wallpapers = match scoped {
                Some(model) => model.wallpaper_files(),
                None => config.wallpaper_files(),
            };
            for wallpaper in wallpapers {
                writeln!(out, "{wallpaper}")?;
            }
        }
        HostCommand::GetFirmwareInfo => {
            write_json(out, &only(config.firmware_info()?, options.model))?;
        }
        HostCommand::GetFirmwareBuildTargets { target_type } => {
            for target in config.firmware_build_targets(target_type, options.firmware_scope())? {
                writeln!(out, "{target}")?;
            }
        }
        HostCommand::GetFirmwareBuildCombinations { target_types } => {
            let types: Vec<&str> = target_types.iter().map(String::as_str).collect();
            let combinations =
                config.firmware_build_combinations(&types, options.firmware_scope())?;
            write_json(out, &combinations)?;
        }
        HostCommand::GetDeviceSignerInfo => {
            write_json(out, &only(config.device_signer_info()?, options.model))?;
        }
        HostCommand::GetFirmwareConfigs => {
            write_json(out, &only(config.firmware_configs()?, options.model))?;
        }
        HostCommand::FileTree { root } => {
            let mut tree = config.file_tree();
            if let Some(root) = root {
                tree.resolve_sizes(root);
            }
            show_tree(out, &tree)?;
        }
    }
    Ok(())
}

/// Print one property as a line: strings raw, anything else as compact JSON.
///
/// A missing path or property prints an empty line so `--all-models`
/// output stays aligned with `list-models`.
fn write_property(
    out: &mut impl Write,
    model: &ModelConfig<'_>,
    path: &str,
    prop: &str,
) -> Result<()> {
    match model.get_property(path, prop) {
        Ok(Value::String(s)) => writeln!(out, "{s}")?,
        Ok(value) => writeln!(out, "{value}")?,
        Err(e) if e.is_not_found() => {
            tracing::warn!(model = model.name(), "{e}");
            writeln!(out)?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn write_files(out: &mut impl Write, files: &[BaseFile]) -> Result<()> {
    for file in files {
        writeln!(out, "{} {}", file.source, file.dest)?;
    }
    Ok(())
}

fn write_symlinked_files(out: &mut impl Write, files: &[SymlinkedFile]) -> Result<()> {
    for file in files {
        writeln!(out, "{} {} {}", file.source, file.dest, file.symlink)?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Keep only `model`'s entry when one is selected.
fn only<T>(mut map: BTreeMap<String, T>, model: Option<&str>) -> BTreeMap<String, T> {
    if let Some(model) = model {
        map.retain(|name, _| name == model);
    }
    map
}
