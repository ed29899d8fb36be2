//! Scene diff engine.
//!
//! Compares two parsed scene graphs and reports which objects were added,
//! removed or modified.
//!
//! ## Entry point
//!
//! ```
//! use scenediff_core::diff::{diff_documents, render_human_summary};
//! use scenediff_core::parser::parse;
//!
//! let before = "--- !u!1 &1\n  m_Name: Lamp\n";
//! let after = "--- !u!1 &1\n  m_Name: Lantern\n";
//! let diff = diff_documents(before, after).unwrap();
//! let summary = render_human_summary(&diff, &parse(before).unwrap(), &parse(after).unwrap());
//! assert!(summary.contains("Modified (1)"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical, ordered output.
//! - **Disjointness**: an identifier lands in at most one of the three sets.
//! - **Hierarchy-blind**: child lists do not take part in the comparison.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compute_diff, compute_diff_with, diff_documents, diff_documents_with};
pub use human_summary::render_human_summary;
pub use model::{DiffOptions, FieldChanges, SceneDiff, DEFAULT_TOLERANCE};
