//! Error handling for scenediff-source
//!
//! Wraps scenediff-core ExError with source-specific helpers

use scenediff_core::errors::{ExError, ExErrorKind, SceneDiffError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// The adapter executable does not exist
pub fn adapter_missing(path: &std::path::Path) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("adapter_spawn")
        .with_message(format!("adapter executable not found at {}", path.display()))
}

/// The adapter process exited during start-up
pub fn adapter_exited(status: std::process::ExitStatus, stderr: &str) -> ExError {
    ExError::from(SceneDiffError::SourceUnavailable {
        reason: format!("adapter exited immediately ({}): {}", status, stderr.trim()),
    })
    .with_op("adapter_spawn")
}

/// The adapter is no longer running or closed its output
pub fn adapter_gone(reason: &str) -> ExError {
    ExError::from(SceneDiffError::SourceUnavailable {
        reason: reason.to_string(),
    })
}

/// The adapter answered `ok: false`
pub fn adapter_failed(message: Option<String>) -> ExError {
    ExError::from(SceneDiffError::SourceFailed {
        message: message.unwrap_or_else(|| "no error text".to_string()),
    })
}

/// The adapter wrote something that is not a protocol response
pub fn protocol_violation(detail: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::ProtocolViolation)
        .with_op("adapter_read")
        .with_message(detail)
}

/// Create a serialization error from serde_json::Error
pub fn from_serde_json(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// A revision this source cannot serve
pub fn revision_not_found(revision: &str) -> ExError {
    SceneDiffError::RevisionNotFound {
        revision: revision.to_string(),
    }
    .into()
}

/// A path missing at an otherwise valid revision
pub fn path_not_found(revision: &str, path: &str) -> ExError {
    SceneDiffError::PathNotFound {
        revision: revision.to_string(),
        path: path.to_string(),
    }
    .into()
}

/// Locating an adapter is not supported on this operating system
pub fn unsupported_platform(os: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("adapter_locate")
        .with_message(format!("no adapter build for platform {}", os))
}
