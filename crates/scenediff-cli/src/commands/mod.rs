pub mod diff;
pub mod parse;
pub mod rev_diff;

use clap::ValueEnum;
use scenediff_core::diff::{render_human_summary, SceneDiff};
use scenediff_core::SceneGraph;

/// How a diff is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary with object names
    #[default]
    Text,
    /// The structured diff as pretty JSON
    Json,
}

/// Render a diff for stdout in the requested format
pub fn render_diff(
    diff: &SceneDiff,
    before: &SceneGraph,
    after: &SceneGraph,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Text => Ok(render_human_summary(diff, before, after)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(diff)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Clap value parser for `--tolerance`: a finite, non-negative float
pub fn parse_tolerance(raw: &str) -> Result<f32, String> {
    let value: f32 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("tolerance must be finite and non-negative, got `{raw}`"));
    }
    Ok(value)
}
