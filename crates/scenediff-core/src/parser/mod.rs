//! Scene document parser
//!
//! A single forward scan over the document lines drives a small state
//! machine ([`scanner`]); a resolve step then remaps transform-keyed data
//! onto object identifiers ([`resolve`]).
//!
//! Parsing is best-effort: unrecognized lines and record kinds are skipped.
//! The only failure is a malformed number inside a transform body.

pub mod prefab;
pub mod resolve;
pub mod scanner;
pub mod tokens;

use crate::errors::ExError;
use crate::model::SceneGraph;
use crate::{log_op_end, log_op_error, log_op_start};

pub use prefab::PrefabOverrides;
pub use scanner::{transition, Effect, ForwardScan, ScanState};
pub use tokens::{tokenize, Token};

/// Parse one scene document into a [`SceneGraph`].
///
/// # Errors
///
/// Returns an `InvalidNumber` error, carrying the transform identifier and
/// the 1-based line, when a position, rotation or scale component inside a
/// transform body is not a valid number.
///
/// # Example
///
/// ```
/// use scenediff_core::parser::parse;
/// use scenediff_core::model::FileId;
///
/// let graph = parse("--- !u!1 &1\n  m_Name: Cube\n").unwrap();
/// assert_eq!(graph.name(FileId(1)), Some("Cube"));
/// assert_eq!(graph.roots(), &[FileId(1)]);
/// ```
pub fn parse(text: &str) -> Result<SceneGraph, ExError> {
    log_op_start!("parse", bytes = text.len());
    let start = std::time::Instant::now();

    let scan = match ForwardScan::run(text) {
        Ok(scan) => scan,
        Err(e) => {
            log_op_error!(
                "parse",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(e);
        }
    };
    let line_count = scan.line_count;
    let graph = scan.resolve();

    log_op_end!(
        "parse",
        duration_ms = start.elapsed().as_millis() as u64,
        line_count = line_count,
        object_count = graph.object_count(),
        root_count = graph.roots().len()
    );
    Ok(graph)
}
