//! Git history configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GitConfig {
    /// Upper bound on commits walked from HEAD. Default: 10000.
    pub max_commits: Option<usize>,
    /// Run the history phase at all. Default: true.
    pub enabled: Option<bool>,
}

impl GitConfig {
    pub fn effective_max_commits(&self) -> usize {
        self.max_commits.unwrap_or(10_000)
    }

    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}
