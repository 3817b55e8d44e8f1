//! Pipeline errors and non-fatal error collection.

use std::path::PathBuf;

use super::error_code::{self, VibeErrorCode};
use super::{ConfigError, GitError, ParseError, ReportError, ScanError, ToolError};

/// Errors that can occur during a verification run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Repository path does not exist or is not a directory: {path}")]
    InvalidTarget { path: PathBuf },

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VibeErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget { .. } => error_code::INVALID_TARGET,
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Tool(e) => e.error_code(),
            Self::Git(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Allows partial results to be returned even when some phases fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
