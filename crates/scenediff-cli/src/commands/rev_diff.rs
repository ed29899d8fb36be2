//! Revision diff command
//!
//! Usage: scenediff rev-diff --repo <DIR> --path <REL> --from <REV> --to <REV>
//!        [--adapter <EXE> | --package-root <DIR>] [--tolerance <F>] [--format text|json]

use clap::Args;
use std::path::PathBuf;

use scenediff_core::diff::{compute_diff_with, DiffOptions, DEFAULT_TOLERANCE};
use scenediff_source::{locate_adapter, AdapterClient, RoutedSource, SceneSource, WORKTREE};

use super::{parse_tolerance, render_diff, OutputFormat};

#[derive(Debug, Args)]
pub struct RevDiffArgs {
    /// Repository root
    #[arg(long)]
    pub repo: PathBuf,

    /// Document path relative to the repository root
    #[arg(long)]
    pub path: String,

    /// Earlier revision (WORKTREE for the file on disk)
    #[arg(long)]
    pub from: String,

    /// Later revision (WORKTREE for the file on disk)
    #[arg(long, default_value = WORKTREE)]
    pub to: String,

    /// Adapter executable serving historical file contents
    #[arg(long, conflicts_with = "package_root")]
    pub adapter: Option<PathBuf>,

    /// Package directory to search for a platform build of the adapter
    #[arg(long)]
    pub package_root: Option<PathBuf>,

    /// Largest per-component difference still treated as equal
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
    pub tolerance: f32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute rev-diff command
pub fn execute(args: RevDiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let needs_adapter = args.from != WORKTREE || args.to != WORKTREE;
    let adapter_path = match (&args.adapter, &args.package_root) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(root)) => Some(locate_adapter(root)?),
        (None, None) => None,
    };
    let adapter = match adapter_path {
        Some(path) if needs_adapter => Some(AdapterClient::spawn(&path)?),
        _ => None,
    };
    let mut source = RoutedSource::new(adapter);

    let before_text = source.fetch(&args.repo, &args.from, &args.path)?;
    let after_text = source.fetch(&args.repo, &args.to, &args.path)?;

    let before = scenediff_core::parse(&before_text)
        .map_err(|e| format!("{} at {}: {}", args.path, args.from, e))?;
    let after = scenediff_core::parse(&after_text)
        .map_err(|e| format!("{} at {}: {}", args.path, args.to, e))?;

    let diff = compute_diff_with(&before, &after, &DiffOptions::with_tolerance(args.tolerance));
    tracing::debug!(
        from = %args.from,
        to = %args.to,
        changes = diff.change_count(),
        "revision diff computed"
    );
    print!("{}", render_diff(&diff, &before, &after, args.format)?);

    Ok(())
}
