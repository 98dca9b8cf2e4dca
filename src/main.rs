use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use modcheck::cli::{Cli, Commands};
use modcheck::commands::{Check, Validate};
use modcheck::logging;
use modcheck::manifest::{CaseMode, LoadOptions};

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    let _guard = logging::init(cli.verbose, &log_dir)?;

    let options = LoadOptions {
        case: if cli.case_sensitive {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        },
    };

    let result = match &cli.command {
        Commands::Check {
            host,
            out_dir,
            format,
        } => Check::execute(host, &cli.data_dir, out_dir, *format, options)
            .context("Failed to execute check command"),
        Commands::Validate { file } => {
            Validate::execute(file, options).context("Failed to execute validate command")
        }
    };

    // Fatal errors land in the persisted log too, not only on stderr
    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }

    result
}

fn default_log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map_or_else(|| PathBuf::from("logs"), |d| d.join("modcheck").join("logs"))
}
