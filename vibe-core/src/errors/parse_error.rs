//! Parse errors for source files and tool output.

use std::path::PathBuf;

use super::error_code::{self, VibeErrorCode};

/// Errors that can occur while parsing source code or tool output.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar not available for {language}")]
    GrammarUnavailable { language: String },

    #[error("Parse failed for {path}: {message}")]
    SourceFailed { path: PathBuf, message: String },

    #[error("Malformed {format} output from {tool}: {message}")]
    MalformedOutput {
        tool: String,
        format: String,
        message: String,
    },
}

impl VibeErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
