//! SceneDiff Core - scene document parser and structural diff
//!
//! This crate provides the in-memory kernel of SceneDiff:
//! - A line-oriented parser for Unity-style YAML scene documents that
//!   produces a normalized [`SceneGraph`] keyed by object identifiers
//! - A structural diff between two graphs (added / removed / modified)
//! - A human-readable diff summary
//! - The shared error facility and logging facility
//!
//! The core is synchronous and performs no I/O; fetching documents lives in
//! `scenediff-source`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod parser;

pub use scenediff_core_types as core_types;

// Re-export commonly used types
pub use diff::{compute_diff, compute_diff_with, diff_documents, DiffOptions, SceneDiff};
pub use errors::{ExError, ExErrorKind, Result, SceneDiffError};
pub use model::{FileId, Quat, SceneGraph, TransformData, Vec3};
pub use parser::parse;
