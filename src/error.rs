use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the analysis pipeline.
///
/// Every variant is fatal to the run that raised it; callers running several
/// buffer distances decide whether the remaining runs continue.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An input file is missing, unreadable, or structurally unusable
    /// (wrong shape type, required attribute column absent).
    #[error("failed to load {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// Geometry that cannot be repaired or processed, including an empty
    /// disruptor set after filtering and non-finite coordinates.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// An output artifact could not be written.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// Build a `Load` error for `path` from any displayable cause.
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load { path: path.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
