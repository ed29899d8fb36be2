//! Diff command
//!
//! Usage: scenediff diff <BEFORE> <AFTER> [--tolerance <F>] [--format text|json]

use clap::Args;
use std::path::{Path, PathBuf};

use scenediff_core::diff::{compute_diff_with, DiffOptions, DEFAULT_TOLERANCE};
use scenediff_core::SceneGraph;

use super::{parse_tolerance, render_diff, OutputFormat};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Earlier version of the document
    pub before: PathBuf,

    /// Later version of the document
    pub after: PathBuf,

    /// Largest per-component difference still treated as equal
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
    pub tolerance: f32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let before = load(&args.before)?;
    let after = load(&args.after)?;

    let diff = compute_diff_with(&before, &after, &DiffOptions::with_tolerance(args.tolerance));
    print!("{}", render_diff(&diff, &before, &after, args.format)?);

    Ok(())
}

fn load(path: &Path) -> Result<SceneGraph, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let graph = scenediff_core::parse(&text)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(graph)
}
