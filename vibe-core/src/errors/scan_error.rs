//! Repository walking errors.

use std::path::PathBuf;

use super::error_code::{self, VibeErrorCode};

/// Errors that can occur while walking or reading the target repository.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Walk error: {message}")]
    Walk { message: String },

    #[error("Invalid glob pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl VibeErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}
