//! Flatten a cros-config YAML source into the canonical JSON artifact.

use clap::Parser;
use colored::Colorize;

use cros_config_cli::cli::SchemaCli;
use cros_config_cli::commands::run_transform;
use cros_config_cli::{CliError, Result, logging};
use cros_config_schema::TransformOptions;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = SchemaCli::parse();
    logging::init(cli.verbose).map_err(|e| CliError::user(format!("logging: {e}")))?;

    let options = TransformOptions {
        schema: cli.schema,
        config: cli.config,
        output: cli.output,
        filter: cli.filter,
    };
    run_transform(&options, &mut std::io::stdout().lock())
}
