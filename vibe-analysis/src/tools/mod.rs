//! External tool execution.

pub mod context;
pub mod runner;
pub mod types;

pub use context::ToolContext;
pub use runner::{SystemToolRunner, ToolRunner};
pub use types::{truncate_tail, ToolInvocation, ToolOutput, ToolReport, ToolStatus};
