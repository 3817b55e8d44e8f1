//! Git history errors.

use super::error_code::{self, VibeErrorCode};

/// Errors from the git history analyzer.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("Not a git repository: {path}")]
    NotARepository { path: String },

    #[error("Git operation '{operation}' failed: {message}")]
    Operation { operation: String, message: String },
}

impl VibeErrorCode for GitError {
    fn error_code(&self) -> &'static str {
        error_code::GIT_ERROR
    }
}
