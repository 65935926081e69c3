//! Error types for the Sarv parsing pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Sarv operations.
#[derive(Error, Debug)]
pub enum SarvError {
    /// A collaborator resource or the parsing model file could not be read.
    #[error("Failed to load resource {path}: {reason}")]
    ResourceLoad {
        /// Path of the resource that failed to load.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The parsing engine could not build a model from an existing file.
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// The parsing engine rejected a record.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failure while producing one element of a sentence stream.
    #[error("Sentence {index} failed: {source}")]
    Sentence {
        /// Zero-based position of the sentence in its stream.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<SarvError>,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SarvError {
    /// Builds a [`SarvError::ResourceLoad`] for `path`.
    pub fn resource(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SarvError::ResourceLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Index of the failing sentence, if this error came out of a stream.
    pub fn sentence_index(&self) -> Option<usize> {
        match self {
            SarvError::Sentence { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type alias for Sarv operations.
pub type Result<T> = std::result::Result<T, SarvError>;

impl From<serde_json::Error> for SarvError {
    fn from(err: serde_json::Error) -> Self {
        SarvError::Serialization(err.to_string())
    }
}
