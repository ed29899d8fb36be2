//! Human-readable summary renderer for scene diffs.

use std::collections::BTreeSet;

use crate::diff::model::SceneDiff;
use crate::model::{FileId, SceneGraph};

/// Placeholder printed when an identifier has no name in the graph consulted
pub const UNKNOWN_NAME: &str = "[Unknown]";

/// Render a Markdown/text summary of a [`SceneDiff`].
///
/// Added and modified objects are named from `after`, removed objects from
/// `before`. The summary is informational only.
pub fn render_human_summary(diff: &SceneDiff, before: &SceneGraph, after: &SceneGraph) -> String {
    let mut out = String::new();

    out.push_str("## Scene Diff\n\n");

    if diff.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    section(&mut out, "Added", &diff.added, |id| entry(after, id));
    section(&mut out, "Removed", &diff.removed, |id| entry(before, id));
    section(&mut out, "Modified", &diff.modified, |id| {
        let mut line = entry(after, id);
        if let Some(changes) = diff.changes.get(&id) {
            let labels = changes.labels();
            if !labels.is_empty() {
                line.push_str(&format!(": {}", labels.join(", ")));
            }
        }
        line
    });

    out
}

fn section(
    out: &mut String,
    title: &str,
    ids: &BTreeSet<FileId>,
    render: impl Fn(FileId) -> String,
) {
    out.push_str(&format!("### {} ({})\n\n", title, ids.len()));
    if ids.is_empty() {
        out.push_str("_None_\n\n");
        return;
    }
    for &id in ids {
        out.push_str(&format!("- {}\n", render(id)));
    }
    out.push('\n');
}

fn entry(graph: &SceneGraph, id: FileId) -> String {
    let name = graph.name(id).unwrap_or(UNKNOWN_NAME);
    format!("{}  (id {})", name, id)
}
