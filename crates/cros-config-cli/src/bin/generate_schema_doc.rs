//! Regenerate the schema type tables in a Markdown document.

use clap::Parser;
use colored::Colorize;

use cros_config_cli::cli::DocCli;
use cros_config_cli::commands::run_generate_doc;
use cros_config_cli::{CliError, Result, logging};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = DocCli::parse();
    logging::init(cli.verbose).map_err(|e| CliError::user(format!("logging: {e}")))?;

    run_generate_doc(
        cli.schema.as_deref(),
        cli.output.as_deref(),
        &mut std::io::stdout().lock(),
    )
}
