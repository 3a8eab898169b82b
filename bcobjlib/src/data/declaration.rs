//! The declaration record produced by scanning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::kind::ObjectKind;

/// A Business Central object declared in an AL file.
///
/// Records are created by the scanner and never modified afterwards.
/// `id` is non-empty exactly when `kind` requires an ID; `name` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Object kind (serialized as its lowercase keyword)
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Numeric object ID, empty for kinds without one
    pub id: String,
    /// Declared object name, verbatim from the quoted literal
    pub name: String,
    /// File the declaration was found in
    #[serde(rename = "filePath")]
    pub source_location: PathBuf,
}

impl Declaration {
    pub(crate) fn new(
        kind: ObjectKind,
        id: impl Into<String>,
        name: impl Into<String>,
        source_location: &Path,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            source_location: source_location.to_path_buf(),
        }
    }
}
