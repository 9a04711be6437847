//! Query a cros-config artifact from build scripts.

use clap::Parser;
use colored::Colorize;

use cros_config_cli::cli::HostCli;
use cros_config_cli::commands::{QueryOptions, run_query};
use cros_config_cli::{CliError, Result, logging};
use cros_config_host::CrosConfig;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = HostCli::parse();
    logging::init(cli.verbose).map_err(|e| CliError::user(format!("logging: {e}")))?;

    let config = CrosConfig::from_path(&cli.config)?;
    let options = QueryOptions {
        model: cli.model.as_deref(),
        all_models: cli.all_models,
        fw_name: cli.fw_name.as_deref(),
    };
    run_query(&config, &cli.command, options, &mut std::io::stdout().lock())
}
