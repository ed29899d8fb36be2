//! Scene diff computation engine.
//!
//! The core entry point is [`compute_diff`], which compares two parsed
//! graphs. [`diff_documents`] parses two document texts first.

use std::collections::BTreeSet;

use crate::diff::model::{DiffOptions, FieldChanges, SceneDiff};
use crate::errors::ExError;
use crate::model::{FileId, SceneGraph, TransformData};
use crate::parser::parse;
use crate::{log_op_end, log_op_start};

/// Compare two graphs with the default tolerance.
///
/// # Example
///
/// ```
/// use scenediff_core::diff::compute_diff;
/// use scenediff_core::parser::parse;
/// use scenediff_core::model::FileId;
///
/// let before = parse("--- !u!1 &1\n  m_Name: A\n").unwrap();
/// let after = parse("--- !u!1 &2\n  m_Name: B\n").unwrap();
/// let diff = compute_diff(&before, &after);
/// assert!(diff.added.contains(&FileId(2)));
/// assert!(diff.removed.contains(&FileId(1)));
/// ```
pub fn compute_diff(before: &SceneGraph, after: &SceneGraph) -> SceneDiff {
    compute_diff_with(before, after, &DiffOptions::default())
}

/// Compare two graphs.
///
/// Identity is the set of named objects on each side. Child lists are not
/// compared.
pub fn compute_diff_with(
    before: &SceneGraph,
    after: &SceneGraph,
    options: &DiffOptions,
) -> SceneDiff {
    log_op_start!(
        "compute_diff",
        before_count = before.object_count(),
        after_count = after.object_count()
    );
    let start = std::time::Instant::now();

    let ids: BTreeSet<FileId> = before
        .names()
        .keys()
        .chain(after.names().keys())
        .copied()
        .collect();

    let mut diff = SceneDiff::default();
    for id in ids {
        match (before.name(id), after.name(id)) {
            (None, Some(_)) => {
                diff.added.insert(id);
            }
            (Some(_), None) => {
                diff.removed.insert(id);
            }
            (Some(name_before), Some(name_after)) => {
                let mut changes = compare_transforms(
                    before.transform(id),
                    after.transform(id),
                    options.tolerance,
                );
                changes.name = name_before != name_after;
                if changes.any() {
                    diff.modified.insert(id);
                    diff.changes.insert(id, changes);
                }
            }
            (None, None) => {}
        }
    }

    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        added_count = diff.added.len(),
        removed_count = diff.removed.len(),
        modified_count = diff.modified.len()
    );
    diff
}

/// Parse both documents and compare them with the default tolerance.
///
/// # Errors
///
/// Propagates the parse error of whichever document fails first, with the
/// operation context set to `diff_documents`.
pub fn diff_documents(before_text: &str, after_text: &str) -> Result<SceneDiff, ExError> {
    diff_documents_with(before_text, after_text, &DiffOptions::default())
}

/// [`diff_documents`] with explicit options.
///
/// # Errors
///
/// See [`diff_documents`].
pub fn diff_documents_with(
    before_text: &str,
    after_text: &str,
    options: &DiffOptions,
) -> Result<SceneDiff, ExError> {
    let before = parse(before_text).map_err(|e| {
        ExError::new(e.kind())
            .with_op("diff_documents")
            .with_message("failed to parse the earlier document")
            .with_source(e)
    })?;
    let after = parse(after_text).map_err(|e| {
        ExError::new(e.kind())
            .with_op("diff_documents")
            .with_message("failed to parse the later document")
            .with_source(e)
    })?;
    Ok(compute_diff_with(&before, &after, options))
}

fn compare_transforms(
    before: Option<&TransformData>,
    after: Option<&TransformData>,
    tolerance: f32,
) -> FieldChanges {
    match (before, after) {
        (None, None) => FieldChanges::default(),
        (Some(_), None) | (None, Some(_)) => FieldChanges {
            transform: true,
            ..FieldChanges::default()
        },
        (Some(a), Some(b)) if within(&a.components(), &b.components(), tolerance) => {
            FieldChanges::default()
        }
        (Some(a), Some(b)) => FieldChanges {
            position: !within(&a.position.to_array(), &b.position.to_array(), tolerance),
            rotation: !within(&a.rotation.to_array(), &b.rotation.to_array(), tolerance),
            scale: !within(&a.scale.to_array(), &b.scale.to_array(), tolerance),
            ..FieldChanges::default()
        },
    }
}

fn within(a: &[f32], b: &[f32], tolerance: f32) -> bool {
    a.iter()
        .zip(b)
        .all(|(x, y)| x == y || (x - y).abs() <= tolerance)
}
