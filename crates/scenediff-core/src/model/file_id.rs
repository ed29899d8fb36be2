use serde::{Deserialize, Serialize};

/// Document-local object identifier
///
/// Assigned by the authoring tool that wrote the document (the `&<id>` anchor
/// of a record header or the `fileID` of a reference). Opaque: no numeric
/// pattern is assumed beyond uniqueness within a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub i64);

impl FileId {
    /// Parse a run of decimal digits as captured from a document line.
    ///
    /// Returns `None` for literals that do not fit in 64 bits.
    pub fn parse(digits: &str) -> Option<Self> {
        digits.parse().ok().map(FileId)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FileId {
    fn from(value: i64) -> Self {
        FileId(value)
    }
}
