//! Report output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Valid values for `report.redact_level`.
pub const REDACT_LEVELS: &[&str] = &["low", "medium", "high"];

/// Configuration for report output and sanitization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Output directory for report artifacts. Default: `./reports`.
    pub output_dir: Option<PathBuf>,
    /// Output format: `console` or `json`. Default: `console`.
    pub format: Option<String>,
    /// Sanitize sensitive data in output. Default: true.
    pub sanitize: Option<bool>,
    /// Redaction level: low, medium, high. Default: medium.
    pub redact_level: Option<String>,
    /// Write sanitized `raw_results.json`. Default: false.
    pub save_raw_results: Option<bool>,
}

impl ReportConfig {
    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("reports"))
    }

    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or("console")
    }

    pub fn effective_sanitize(&self) -> bool {
        self.sanitize.unwrap_or(true)
    }

    pub fn effective_redact_level(&self) -> &str {
        self.redact_level.as_deref().unwrap_or("medium")
    }

    pub fn effective_save_raw_results(&self) -> bool {
        self.save_raw_results.unwrap_or(false)
    }
}
