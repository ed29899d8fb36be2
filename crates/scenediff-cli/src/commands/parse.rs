//! Parse command
//!
//! Usage: scenediff parse <FILE> [--output <FILE>]

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Scene document to parse
    pub file: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute parse command
pub fn execute(args: ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.file)
        .map_err(|e| format!("cannot read {}: {}", args.file.display(), e))?;

    let graph = scenediff_core::parse(&text)?;
    let mut json = serde_json::to_string_pretty(&graph)?;
    json.push('\n');

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, json)?;
        println!("✓ Wrote scene graph to {}", output_path.display());
    } else {
        print!("{}", json);
    }

    Ok(())
}
