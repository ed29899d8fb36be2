//! Revision routing between the working tree and the adapter

use std::path::Path;

use scenediff_core::errors::{ExError, ExErrorKind};

use crate::adapter::AdapterClient;
use crate::errors::Result;
use crate::working_tree::{WorkingTreeSource, WORKTREE};
use crate::SceneSource;

/// Serves [`WORKTREE`] from disk and every other revision from an adapter
#[derive(Default)]
pub struct RoutedSource {
    worktree: WorkingTreeSource,
    adapter: Option<AdapterClient>,
}

impl RoutedSource {
    pub fn new(adapter: Option<AdapterClient>) -> Self {
        Self {
            worktree: WorkingTreeSource::new(),
            adapter,
        }
    }

    pub fn has_adapter(&self) -> bool {
        self.adapter.is_some()
    }
}

impl SceneSource for RoutedSource {
    fn fetch(&mut self, repo_root: &Path, revision: &str, path: &str) -> Result<String> {
        if revision == WORKTREE {
            return self.worktree.fetch(repo_root, revision, path);
        }
        match self.adapter.as_mut() {
            Some(adapter) => adapter.fetch(repo_root, revision, path),
            None => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("fetch")
                .with_message(format!(
                    "revision {} needs an adapter; only {} is readable without one",
                    revision, WORKTREE
                ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worktree_without_adapter() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.unity"), "text").unwrap();

        let mut source = RoutedSource::new(None);
        assert!(!source.has_adapter());
        assert_eq!(source.fetch(dir.path(), WORKTREE, "a.unity").unwrap(), "text");
    }

    #[test]
    fn test_history_without_adapter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = RoutedSource::default()
            .fetch(dir.path(), "HEAD~1", "a.unity")
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.message().contains("HEAD~1"));
    }
}
