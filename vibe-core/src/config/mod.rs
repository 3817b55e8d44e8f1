//! Configuration system for vibe-verifier.
//! TOML-based, layered resolution: CLI > env > explicit file > project > user > defaults.

pub mod docs_config;
pub mod git_config;
pub mod phase_config;
pub mod report_config;
pub mod scan_config;
pub mod test_config;
pub mod tool_config;
pub mod vibe_config;

pub use docs_config::DocsConfig;
pub use git_config::GitConfig;
pub use phase_config::PhaseConfig;
pub use report_config::ReportConfig;
pub use scan_config::ScanConfig;
pub use test_config::TestConfig;
pub use tool_config::ToolConfig;
pub use vibe_config::{CliOverrides, VibeConfig};
