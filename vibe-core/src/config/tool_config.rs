//! External tool configuration.

use serde::{Deserialize, Serialize};

/// Timeouts and enablement for external analysis tools.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    /// Timeout for a single linter/analyzer invocation, seconds. Default: 300.
    pub timeout_secs: Option<u64>,
    /// Timeout for crosshair runs, seconds. Default: 60.
    pub crosshair_timeout_secs: Option<u64>,
    /// Tools that must never be invoked, by program name.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl ToolConfig {
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(300)
    }

    pub fn effective_crosshair_timeout_secs(&self) -> u64 {
        self.crosshair_timeout_secs.unwrap_or(60)
    }

    pub fn is_disabled(&self, program: &str) -> bool {
        self.disabled.iter().any(|d| d == program)
    }
}
