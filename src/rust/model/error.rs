use std::io;
use std::path::PathBuf;

/// Represents the different ways loading or running a classifier can fail.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The artifact could not be read from disk
    #[error("Failed to read model file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The artifact is not a valid model document
    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but describes an unusable model
    #[error("Invalid model: {0}")]
    Invalid(String),
    /// A sample does not have the width the model was trained on
    #[error("Model expects {expected} features per sample, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("Hash mismatch for {}: expected {expected}, got {actual}", .path.display())]
    HashMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    #[error("Prediction error: {0}")]
    Prediction(String),
}
