//! VibeErrorCode trait for structured error reporting.

/// Trait for mapping vibe-verifier errors to stable error code strings.
/// Every error enum implements this so the CLI and the raw results can
/// report a machine-readable code alongside the message.
pub trait VibeErrorCode {
    /// Returns the error code string (e.g., "TOOL_TIMEOUT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const TOOL_NOT_FOUND: &str = "TOOL_NOT_FOUND";
pub const TOOL_FAILED: &str = "TOOL_FAILED";
pub const TOOL_TIMEOUT: &str = "TOOL_TIMEOUT";
pub const GIT_ERROR: &str = "GIT_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const INVALID_TARGET: &str = "INVALID_TARGET";
