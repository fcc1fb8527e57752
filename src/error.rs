use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a palette extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{reason}: {}", path.display())]
    ImageLoad { path: PathBuf, reason: String },

    #[error("insufficient color data: found {found} {unit}, need at least {required}")]
    InsufficientColorData {
        found: usize,
        required: usize,
        unit: &'static str,
    },

    #[error("quantization error: {0}")]
    Quantization(String),

    #[error("unknown palette mode: {0}")]
    UnknownMode(String),
}

impl ExtractError {
    pub(crate) fn image_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ExtractError::ImageLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Cache failures. These never escape the extractor; they are logged and
/// treated as a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt cache record: {0}")]
    Corrupt(String),
}
