//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Flatten a cros-config source and validate it against the schema
#[derive(Parser, Debug)]
#[command(name = "cros_config_schema")]
#[command(version, about, long_about = None)]
pub struct SchemaCli {
    /// Schema file; the bundled schema when absent
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Source config file (`-` for stdin)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Output file; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Strip build-only elements from the output
    #[arg(short, long)]
    pub filter: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Query a cros-config artifact
#[derive(Parser, Debug)]
#[command(name = "cros_config_host")]
#[command(version, about, long_about = None)]
pub struct HostCli {
    /// Config file: JSON artifact or YAML source (`-` for stdin)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Scope the query to one model
    #[arg(long, global = true, conflicts_with = "all_models")]
    pub model: Option<String>,

    /// Run the query for every model
    #[arg(long, global = true)]
    pub all_models: bool,

    /// Restrict firmware build-target queries to one model
    #[arg(long, env = "FW_NAME")]
    pub fw_name: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The query to run
    #[command(subcommand)]
    pub command: HostCommand,
}

/// Available queries
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// List model names, one per line
    ListModels,

    /// Print a property of the selected model(s)
    ///
    /// Examples:
    ///   cros_config_host -c config.json --model some get / wallpaper
    ///   cros_config_host -c config.json --all-models get /audio/main card
    Get {
        /// Slash-separated path of the node holding the property
        path: String,
        /// Property name
        prop: String,
    },

    /// List remote firmware image URIs
    GetFirmwareUris,

    /// List touch firmware files as `source dest symlink`
    GetTouchFirmwareFiles,

    /// List audio files as `source dest`
    GetAudioFiles,

    /// List ARC++ files as `source dest`
    GetArcFiles,

    /// List thermal files as `source dest`
    GetThermalFiles,

    /// List wallpaper names
    GetWallpaperFiles,

    /// Print firmware info per model as JSON
    GetFirmwareInfo,

    /// List distinct firmware build targets of one type
    GetFirmwareBuildTargets {
        /// Build-target type, e.g. coreboot, ec or zephyr-ec
        target_type: String,
    },

    /// Print per-model build targets for the given types as JSON
    GetFirmwareBuildCombinations {
        /// Build-target types, in output order
        #[arg(required = true)]
        target_types: Vec<String>,
    },

    /// Print signing key and signature ids per model as JSON
    GetDeviceSignerInfo,

    /// Print firmware images per model as JSON
    GetFirmwareConfigs,

    /// Show every installed file as a tree
    FileTree {
        /// Build root to resolve file sizes against
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

/// Generate Markdown documentation from the schema
#[derive(Parser, Debug)]
#[command(name = "generate_schema_doc")]
#[command(version, about, long_about = None)]
pub struct DocCli {
    /// Schema file; the bundled schema when absent
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Markdown file to update in place; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
