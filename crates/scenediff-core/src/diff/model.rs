//! Scene diff output types.
//!
//! Collections are ordered (`BTreeSet` / `BTreeMap`) so serialized output is
//! deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::FileId;

/// Absolute per-component tolerance used by [`DiffOptions::default`]
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Knobs for [`compute_diff_with`](super::engine::compute_diff_with)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Largest absolute difference between two transform components that
    /// still counts as equal
    pub tolerance: f32,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl DiffOptions {
    pub fn with_tolerance(tolerance: f32) -> Self {
        Self { tolerance }
    }
}

/// Structured difference between two scene graphs.
///
/// `added`, `removed` and `modified` are pairwise disjoint. Every id in
/// `modified` has exactly one entry in `changes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDiff {
    /// Objects present only in the later graph
    pub added: BTreeSet<FileId>,
    /// Objects present only in the earlier graph
    pub removed: BTreeSet<FileId>,
    /// Objects present in both with a different name or transform
    pub modified: BTreeSet<FileId>,
    /// Which fields differ, per modified object
    pub changes: BTreeMap<FileId, FieldChanges>,
}

impl SceneDiff {
    /// True when nothing was added, removed or modified
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Total number of changed objects across the three sets
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Fields that differ for one modified object.
///
/// When exactly one side has a transform, `transform` is set and the
/// component flags stay false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChanges {
    pub name: bool,
    pub transform: bool,
    pub position: bool,
    pub rotation: bool,
    pub scale: bool,
}

impl FieldChanges {
    pub fn any(&self) -> bool {
        self.name || self.transform || self.position || self.rotation || self.scale
    }

    /// Labels of the changed fields, in a fixed order
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.name, "name"),
            (self.transform, "transform"),
            (self.position, "position"),
            (self.rotation, "rotation"),
            (self.scale, "scale"),
        ]
        .into_iter()
        .filter_map(|(changed, label)| changed.then_some(label))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerance() {
        assert_eq!(DiffOptions::default().tolerance, 1e-5);
    }

    #[test]
    fn test_labels_follow_fixed_order() {
        let changes = FieldChanges {
            scale: true,
            name: true,
            ..FieldChanges::default()
        };
        assert_eq!(changes.labels(), vec!["name", "scale"]);
        assert!(changes.any());
        assert!(!FieldChanges::default().any());
    }

    #[test]
    fn test_diff_serializes_ids_as_integers() {
        let mut diff = SceneDiff::default();
        diff.added.insert(FileId(7));
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["added"], serde_json::json!([7]));
        assert!(!diff.is_empty());
        assert_eq!(diff.change_count(), 1);
    }
}
