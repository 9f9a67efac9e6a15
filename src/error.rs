use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DenoiseError {
    #[error("Image not found or unreadable: {} ({reason})", path.display())]
    ImageNotFound { path: PathBuf, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Failed to write output: {0}")]
    Output(String),
}

impl DenoiseError {
    /// Stable machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            DenoiseError::ImageNotFound { .. } => "IMAGE_NOT_FOUND",
            DenoiseError::InvalidArgument(_) => "INVALID_ARGUMENT",
            DenoiseError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            DenoiseError::Output(_) => "OUTPUT_ERROR",
        }
    }
}
