//! Report output errors.

use std::path::PathBuf;

use super::error_code::{self, VibeErrorCode};

/// Errors raised while writing report artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl VibeErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
