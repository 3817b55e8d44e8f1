//! Test execution configuration.

use serde::{Deserialize, Serialize};

/// Configuration for discovering and running the target's test suites.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TestConfig {
    /// Timeout per framework run, seconds. Default: 300.
    pub timeout_secs: Option<u64>,
    /// Run `npm install` when `node_modules` is missing. Default: true.
    pub install_node_modules: Option<bool>,
    /// Characters of stdout/stderr kept per run. Default: 5000.
    pub output_tail_chars: Option<usize>,
}

impl TestConfig {
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(300)
    }

    pub fn effective_install_node_modules(&self) -> bool {
        self.install_node_modules.unwrap_or(true)
    }

    pub fn effective_output_tail_chars(&self) -> usize {
        self.output_tail_chars.unwrap_or(5000)
    }
}
