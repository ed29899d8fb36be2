use scenediff_core_types::RunId;
use thiserror::Error;

use crate::model::FileId;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in SceneDiff. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and machine-readable CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Document content
    InvalidInput,
    /// A numeric literal inside a Transform body could not be parsed
    InvalidNumber,

    // Scene sources
    NotFound,
    /// The helper process answered with something that is not a protocol response
    ProtocolViolation,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidNumber => "ERR_INVALID_NUMBER",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ProtocolViolation => "ERR_PROTOCOL_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, object
/// identifier, document line, run id) for programmatic handling and debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    file_id: Option<FileId>,
    line: Option<usize>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            file_id: None,
            line: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add object/transform identifier context
    pub fn with_file_id(mut self, id: FileId) -> Self {
        self.file_id = Some(id);
        self
    }

    /// Add 1-based document line context
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add run correlation context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the identifier context, if any
    pub fn file_id(&self) -> Option<FileId> {
        self.file_id
    }

    /// Get the document line context, if any
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the run id context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(file_id) = self.file_id {
            write!(f, " (file_id: {})", file_id)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for scene parsing and fetching
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneDiffError {
    /// A transform component literal is not a valid number
    #[error("Malformed number `{literal}` for {field} in transform {transform_id} at line {line}")]
    MalformedNumber {
        transform_id: FileId,
        field: &'static str,
        literal: String,
        line: usize,
    },

    /// The requested revision does not exist in the repository
    #[error("Revision not found: {revision}")]
    RevisionNotFound { revision: String },

    /// The requested path does not exist at the given revision
    #[error("Path {path} not found at revision {revision}")]
    PathNotFound { revision: String, path: String },

    /// The helper process could not be started or has stopped
    #[error("Scene source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// The helper process answered with an error
    #[error("Scene source reported an error: {message}")]
    SourceFailed { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<SceneDiffError> for ExError {
    fn from(err: SceneDiffError) -> Self {
        let message = err.to_string();
        match err {
            SceneDiffError::MalformedNumber {
                transform_id, line, ..
            } => ExError::new(ExErrorKind::InvalidNumber)
                .with_op("parse")
                .with_file_id(transform_id)
                .with_line(line)
                .with_message(message),

            SceneDiffError::RevisionNotFound { .. } | SceneDiffError::PathNotFound { .. } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("fetch")
                    .with_message(message)
            }

            SceneDiffError::SourceUnavailable { .. } | SceneDiffError::SourceFailed { .. } => {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op("fetch")
                    .with_message(message)
            }

            SceneDiffError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
