//! Identity resolution
//!
//! Turns the transform-keyed scratch tables of a [`ForwardScan`] into a
//! [`SceneGraph`] keyed purely by object identifiers.

use std::collections::BTreeMap;

use crate::model::{FileId, SceneGraph, TransformData};

use super::scanner::ForwardScan;

impl ForwardScan {
    /// Remap transform data and child lists onto their owning objects, then
    /// fold prefab instances in.
    ///
    /// Transforms without an `m_GameObject` owner are dropped. When several
    /// transforms name the same owner, the one seen last in the document
    /// order of first appearance wins. Prefab instances are applied last
    /// and replace whatever an object with the same identifier recorded.
    pub fn resolve(self) -> SceneGraph {
        let ForwardScan {
            objects,
            mut names,
            owners,
            transform_data,
            child_events,
            prefabs,
            ..
        } = self;

        let mut transforms: BTreeMap<FileId, TransformData> = BTreeMap::new();
        for (transform, data) in transform_data {
            match owners.get(&transform) {
                Some(&owner) => {
                    transforms.insert(owner, data);
                }
                None => {
                    tracing::trace!(transform = transform.get(), "dropping unowned transform");
                }
            }
        }

        let mut children: BTreeMap<FileId, Vec<FileId>> =
            objects.iter().map(|&id| (id, Vec::new())).collect();
        for event in child_events {
            let Some(&parent) = owners.get(&event.parent_transform) else {
                continue;
            };
            let list = children.entry(parent).or_default();
            if let Some(&child) = owners.get(&event.child_transform) {
                list.push(child);
            }
        }

        for (prefab, overrides) in prefabs {
            let Some((name, transform)) = overrides.finish() else {
                tracing::trace!(prefab = prefab.get(), "prefab instance without name override");
                continue;
            };
            names.insert(prefab, name);
            transforms.insert(prefab, transform);
            children.insert(prefab, Vec::new());
        }

        SceneGraph::from_tables(names, transforms, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vec3;

    fn resolve(text: &str) -> SceneGraph {
        ForwardScan::run(text).unwrap().resolve()
    }

    #[test]
    fn test_owner_declared_after_children() {
        let graph = resolve(
            "--- !u!1 &1\n  m_Name: Parent\n--- !u!1 &2\n  m_Name: Child\n\
             --- !u!4 &10\n  m_Children:\n  - {fileID: 20}\n  m_GameObject: {fileID: 1}\n\
             --- !u!4 &20\n  m_GameObject: {fileID: 2}\n",
        );
        assert_eq!(graph.children_of(FileId(1)), &[FileId(2)]);
        assert_eq!(graph.roots(), &[FileId(1)]);
    }

    #[test]
    fn test_unresolved_child_leaves_empty_entry() {
        let graph = resolve(
            "--- !u!4 &10\n  m_GameObject: {fileID: 1}\n  m_Children:\n  - {fileID: 99}\n",
        );
        assert_eq!(graph.children().get(&FileId(1)), Some(&Vec::new()));
    }

    #[test]
    fn test_unowned_transform_is_dropped() {
        let graph = resolve("--- !u!4 &10\n  m_LocalPosition: {x: 1, y: 2, z: 3}\n");
        assert!(graph.transforms().is_empty());
    }

    #[test]
    fn test_prefab_replaces_object_entries() {
        let graph = resolve(
            "--- !u!1 &5\n  m_Name: Plain\n--- !u!4 &6\n  m_GameObject: {fileID: 5}\n\
             \x20 m_LocalPosition: {x: 9, y: 9, z: 9}\n\
             --- !u!1001 &5\nPrefabInstance:\n    m_Modifications:\n\
             \x20   - target: {fileID: 1}\n      propertyPath: m_Name\n      value: Door\n",
        );
        assert_eq!(graph.name(FileId(5)), Some("Door"));
        assert_eq!(graph.transform(FileId(5)).unwrap().position, Vec3::ZERO);
    }
}
