//! SceneDiff CLI
//!
//! Command-line interface for parsing and diffing scene documents

use clap::{Parser, Subcommand, ValueEnum};
use scenediff_core::core_types::RunId;
use scenediff_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "scenediff")]
#[command(about = "SceneDiff - structural diffs of scene documents", long_about = None)]
struct Cli {
    /// Enable logging to stderr with the given profile
    #[arg(long, global = true, value_enum)]
    log_profile: Option<LogProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(p: LogProfile) -> Self {
        match p {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse one document and print its scene graph as JSON
    Parse(commands::parse::ParseArgs),
    /// Diff two documents on disk
    Diff(commands::diff::DiffArgs),
    /// Diff one document between two revisions of a repository
    RevDiff(commands::rev_diff::RevDiffArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile.into());
    }

    let run_id = RunId::new();
    let _span = tracing::info_span!("run", run_id = %run_id).entered();

    let result = match cli.command {
        Commands::Parse(args) => commands::parse::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::RevDiff(args) => commands::rev_diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
