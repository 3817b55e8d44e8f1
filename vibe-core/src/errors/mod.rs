//! Error handling for vibe-verifier.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod git_error;
pub mod parse_error;
pub mod pipeline_error;
pub mod report_error;
pub mod scan_error;
pub mod tool_error;

pub use config_error::ConfigError;
pub use error_code::VibeErrorCode;
pub use git_error::GitError;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use report_error::ReportError;
pub use scan_error::ScanError;
pub use tool_error::ToolError;
