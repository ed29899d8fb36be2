//! SceneDiff Source - fetching scene documents at a revision
//!
//! The parser and diff engine take complete document text. This crate
//! provides that text: from the working tree on disk, or from a helper
//! process that reads files out of version control.

pub mod adapter;
pub mod errors;
pub mod locate;
pub mod routed;
pub mod working_tree;

use std::path::Path;

pub use adapter::{AdapterClient, AdapterRequest, AdapterResponse, AdapterSession};
pub use errors::Result;
pub use locate::locate_adapter;
pub use routed::RoutedSource;
pub use working_tree::{WorkingTreeSource, WORKTREE};

/// Something that can produce the full text of a file at a revision
pub trait SceneSource {
    /// Fetch `path` (relative to `repo_root`) as it was at `revision`.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing revision or path, `ExternalService` when the
    /// backing service is unavailable or reports a failure, `Io` and
    /// `Serialization` for transport problems.
    fn fetch(&mut self, repo_root: &Path, revision: &str, path: &str) -> Result<String>;
}
