use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{FileId, TransformData};

/// Normalized object graph of one scene document
///
/// Built once by the parser (or by [`SceneGraph::from_tables`]) and read-only
/// afterwards. All tables are keyed by object identifiers; transform
/// identifiers never appear here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    names: BTreeMap<FileId, String>,
    transforms: BTreeMap<FileId, TransformData>,
    children: BTreeMap<FileId, Vec<FileId>>,
    roots: Vec<FileId>,
}

impl SceneGraph {
    /// Assemble a graph from finished tables and derive its roots.
    ///
    /// A root is a named object that is not listed as a child anywhere in
    /// `children`. Roots come out in ascending identifier order.
    pub fn from_tables(
        names: BTreeMap<FileId, String>,
        transforms: BTreeMap<FileId, TransformData>,
        children: BTreeMap<FileId, Vec<FileId>>,
    ) -> Self {
        let all_children: BTreeSet<FileId> = children.values().flatten().copied().collect();
        let roots = names
            .keys()
            .filter(|id| !all_children.contains(id))
            .copied()
            .collect();

        Self {
            names,
            transforms,
            children,
            roots,
        }
    }

    pub fn names(&self) -> &BTreeMap<FileId, String> {
        &self.names
    }

    pub fn transforms(&self) -> &BTreeMap<FileId, TransformData> {
        &self.transforms
    }

    pub fn children(&self) -> &BTreeMap<FileId, Vec<FileId>> {
        &self.children
    }

    pub fn roots(&self) -> &[FileId] {
        &self.roots
    }

    pub fn name(&self, id: FileId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn transform(&self, id: FileId) -> Option<&TransformData> {
        self.transforms.get(&id)
    }

    /// Children of `id` in declaration order (empty when none are recorded)
    pub fn children_of(&self, id: FileId) -> &[FileId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `id` has a name entry
    pub fn contains(&self, id: FileId) -> bool {
        self.names.contains_key(&id)
    }

    /// Number of named objects
    pub fn object_count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.transforms.is_empty() && self.children.is_empty()
    }
}
