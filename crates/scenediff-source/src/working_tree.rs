//! Working-tree scene source

use std::path::Path;

use scenediff_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{self, Result};
use crate::SceneSource;

/// Revision label for the files currently on disk
pub const WORKTREE: &str = "WORKTREE";

/// Reads documents straight from disk
///
/// Only the [`WORKTREE`] revision exists for this source.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingTreeSource;

impl WorkingTreeSource {
    pub fn new() -> Self {
        Self
    }

    fn read(repo_root: &Path, revision: &str, path: &str) -> Result<String> {
        if revision != WORKTREE {
            return Err(errors::revision_not_found(revision));
        }
        let full = repo_root.join(path);
        std::fs::read_to_string(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => errors::path_not_found(revision, path),
            _ => errors::io_error("read_scene", e),
        })
    }
}

impl SceneSource for WorkingTreeSource {
    fn fetch(&mut self, repo_root: &Path, revision: &str, path: &str) -> Result<String> {
        log_op_start!("fetch", source = "working_tree", revision, path);
        let start = std::time::Instant::now();

        match Self::read(repo_root, revision, path) {
            Ok(text) => {
                log_op_end!(
                    "fetch",
                    duration_ms = start.elapsed().as_millis() as u64,
                    bytes = text.len()
                );
                Ok(text)
            }
            Err(e) => {
                log_op_error!(
                    "fetch",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }
}
