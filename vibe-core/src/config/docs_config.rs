//! Documentation analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for claim extraction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocsConfig {
    /// Extract claims from Python docstrings. Default: true.
    pub inline_docs: Option<bool>,
    /// Confidence at or above which a claim counts as high confidence. Default: 0.7.
    pub high_confidence_threshold: Option<f64>,
}

impl DocsConfig {
    pub fn effective_inline_docs(&self) -> bool {
        self.inline_docs.unwrap_or(true)
    }

    pub fn effective_high_confidence_threshold(&self) -> f64 {
        self.high_confidence_threshold.unwrap_or(0.7)
    }
}
