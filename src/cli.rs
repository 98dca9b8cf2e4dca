use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Multiplayer Mod Conflict Checker
///
/// Compare every player's exported mod state against the host's before a shared session
#[derive(Parser, Debug)]
#[command(name = "modcheck")]
#[command(long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing the players' exported state files
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        default_value = "data/settings_json"
    )]
    pub data_dir: PathBuf,

    /// Directory for the persisted log file (default: platform state directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Compare mod identifiers case-sensitively
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare every guest's mod state against the host's
    Check {
        /// Name of the host's state file (with or without .json)
        #[arg(long, value_name = "NAME")]
        host: String,

        /// Directory conflict reports are written to
        #[arg(
            long,
            value_name = "PATH",
            default_value = "data/conflict_analysis"
        )]
        out_dir: PathBuf,

        /// Report format(s) to write
        #[arg(long, value_enum, default_value = "all")]
        format: ReportFormat,
    },

    /// Parse a single state file and report structural problems
    Validate {
        /// State file to check
        file: PathBuf,
    },
}

/// Which report writers to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Per-guest CSV tables only
    Csv,
    /// Single JSON document only
    Json,
    /// Both CSV and JSON
    All,
}
