//! Error and warning types for project documents

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A problem in a document that was tolerated with a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentWarning {
    /// Height and width disagree; height wins
    #[error("document is not square (height {height}, width {width}); using height {height}")]
    InvalidDimension { height: u32, width: u32 },
    /// A field is missing or has the wrong shape
    #[error("{field}: {problem}")]
    MalformedDocument { field: String, problem: String },
}

impl DocumentWarning {
    pub(crate) fn malformed(field: impl Into<String>, problem: impl Into<String>) -> Self {
        DocumentWarning::MalformedDocument { field: field.into(), problem: problem.into() }
    }
}

/// A save or load that could not complete.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("failed to read project '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write project '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("project document must be a JSON object")]
    NotAnObject,
}
