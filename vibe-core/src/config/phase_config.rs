//! Phase selection.

use serde::{Deserialize, Serialize};

/// Which pipeline phases run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PhaseConfig {
    /// Skip test execution. Default: false.
    pub skip_tests: Option<bool>,
    /// Skip formal verification. Default: false.
    pub skip_verification: Option<bool>,
    /// Quick mode: skips formal verification, test execution, and the
    /// per-file git ownership/abandonment scans. Default: false.
    pub quick: Option<bool>,
}

impl PhaseConfig {
    pub fn effective_quick(&self) -> bool {
        self.quick.unwrap_or(false)
    }

    /// Tests run unless skipped explicitly or by quick mode.
    pub fn run_tests(&self) -> bool {
        !self.skip_tests.unwrap_or(false) && !self.effective_quick()
    }

    /// Formal verification runs unless skipped explicitly or by quick mode.
    pub fn run_formal_verification(&self) -> bool {
        !self.skip_verification.unwrap_or(false) && !self.effective_quick()
    }
}
