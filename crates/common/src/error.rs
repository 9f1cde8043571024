//! Error types shared across MOSAIC crates.

use std::path::PathBuf;

/// Top-level error type for MOSAIC operations.
///
/// Per-frame geometry failures never surface here; they are recovered
/// inside the batch and reported. This type covers the conditions that
/// abort a whole run.
#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Refusing to overwrite existing file: {path}")]
    AlreadyExists { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Result type alias using MosaicError.
pub type MosaicResult<T> = Result<T, MosaicError>;

impl MosaicError {
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
