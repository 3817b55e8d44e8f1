//! External tool invocation errors.

use std::path::PathBuf;

use super::error_code::{self, VibeErrorCode};

/// Errors raised while running an external analysis tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found on PATH: {program}")]
    NotFound { program: String },

    #[error("Failed to spawn {program} in {cwd}: {source}")]
    Spawn {
        program: String,
        cwd: PathBuf,
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout_secs}s")]
    Timeout { program: String, timeout_secs: u64 },

    #[error("{program} failed: {message}")]
    Failed { program: String, message: String },
}

impl VibeErrorCode for ToolError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::TOOL_NOT_FOUND,
            Self::Timeout { .. } => error_code::TOOL_TIMEOUT,
            Self::Spawn { .. } | Self::Failed { .. } => error_code::TOOL_FAILED,
        }
    }
}
