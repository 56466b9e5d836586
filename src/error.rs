//! Error types for lexguard.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`LexGuardError`]. Token-level problems (empty or overlong tokens) are not
//! errors: those tokens are dropped from the output instead.
//!
//! # Examples
//!
//! ```
//! use lexguard::error::{LexGuardError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(LexGuardError::invalid_config("fake_threshold must be finite"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::Path;

use thiserror::Error;

/// The main error type for lexguard operations.
#[derive(Error, Debug)]
pub enum LexGuardError {
    /// I/O errors (reading word lists, writing artifacts, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary (bincode) serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A required artifact file does not exist
    #[error("Artifact missing: {path}")]
    ArtifactMissing { path: String },

    /// Artifacts were written by another format version or another training run
    #[error("Artifact version mismatch in {path}: {message}")]
    ArtifactVersion { path: String, message: String },

    /// Artifact bytes do not match their recorded checksum
    #[error("Corrupt artifact {path}: {message}")]
    CorruptArtifact { path: String, message: String },

    /// Vectorizer and classifier disagree on the feature space
    #[error("Feature shape mismatch: classifier expects {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// No reference words to measure edit distance against
    #[error("Empty reference sample: {0}")]
    EmptyReference(String),

    /// Training corpus too small to fit a model
    #[error("Insufficient training data: need at least {min_samples} samples, got {actual}")]
    InsufficientData { min_samples: usize, actual: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with LexGuardError.
pub type Result<T> = std::result::Result<T, LexGuardError>;

impl LexGuardError {
    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        LexGuardError::Serialization(msg.into())
    }

    /// Create a new missing-artifact error.
    pub fn artifact_missing(path: &Path) -> Self {
        LexGuardError::ArtifactMissing {
            path: path.display().to_string(),
        }
    }

    /// Create a new artifact version error.
    pub fn artifact_version<S: Into<String>>(path: &Path, msg: S) -> Self {
        LexGuardError::ArtifactVersion {
            path: path.display().to_string(),
            message: msg.into(),
        }
    }

    /// Create a new corrupt-artifact error.
    pub fn corrupt_artifact<S: Into<String>>(path: &Path, msg: S) -> Self {
        LexGuardError::CorruptArtifact {
            path: path.display().to_string(),
            message: msg.into(),
        }
    }

    /// Create a new empty-reference error.
    pub fn empty_reference<S: Into<String>>(msg: S) -> Self {
        LexGuardError::EmptyReference(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LexGuardError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LexGuardError::Other(msg.into())
    }

    /// Whether this error means the artifact set must be replaced before serving.
    pub fn is_artifact_error(&self) -> bool {
        matches!(
            self,
            LexGuardError::ArtifactMissing { .. }
                | LexGuardError::ArtifactVersion { .. }
                | LexGuardError::CorruptArtifact { .. }
                | LexGuardError::Serialization(_)
        )
    }
}

impl From<bincode::Error> for LexGuardError {
    fn from(err: bincode::Error) -> Self {
        LexGuardError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LexGuardError::invalid_config("bad threshold");
        assert_eq!(error.to_string(), "Invalid configuration: bad threshold");

        let error = LexGuardError::artifact_missing(Path::new("/tmp/model/classifier.bin"));
        assert_eq!(
            error.to_string(),
            "Artifact missing: /tmp/model/classifier.bin"
        );
        assert!(error.is_artifact_error());

        let error = LexGuardError::ShapeMismatch {
            expected: 10,
            actual: 8,
        };
        assert!(!error.is_artifact_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = LexGuardError::from(io_error);

        match error {
            LexGuardError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
