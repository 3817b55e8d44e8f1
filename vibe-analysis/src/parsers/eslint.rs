//! ESLint `--format json` report model.

use serde::{Deserialize, Serialize};
use vibe_core::errors::ParseError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EslintFileReport {
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(default)]
    pub messages: Vec<EslintMessage>,
    #[serde(rename = "errorCount", default)]
    pub error_count: usize,
    #[serde(rename = "warningCount", default)]
    pub warning_count: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EslintMessage {
    #[serde(rename = "ruleId", default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
    /// 1 = warning, 2 = error.
    #[serde(default)]
    pub severity: u8,
}

pub fn parse_eslint_report(stdout: &str) -> Result<Vec<EslintFileReport>, ParseError> {
    serde_json::from_str(stdout).map_err(|e| ParseError::MalformedOutput {
        tool: "eslint".to_string(),
        format: "json".to_string(),
        message: e.to_string(),
    })
}
