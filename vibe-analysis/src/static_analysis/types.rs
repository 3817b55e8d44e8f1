//! Static analysis result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parsers::EslintFileReport;
use crate::tools::ToolReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintMessage {
    pub file: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub message: String,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PylintData {
    /// Messages grouped by pylint type (`convention`, `error`, ...).
    pub messages: BTreeMap<String, Vec<LintMessage>>,
    pub total_issues: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EslintData {
    pub reports: Vec<EslintFileReport>,
    pub total_issues: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeIssue {
    pub file: String,
    pub line: u32,
    #[serde(rename = "type")]
    pub severity: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MypyData {
    pub issues: Vec<TypeIssue>,
    pub total_issues: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TscData {
    pub issues: Vec<String>,
    pub total_issues: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BanditIssue {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub issue_severity: String,
    #[serde(default)]
    pub issue_confidence: String,
    #[serde(default)]
    pub issue_text: String,
    #[serde(default)]
    pub test_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BanditData {
    pub metrics: serde_json::Value,
    pub results: Vec<BanditIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretFinding {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecretsData {
    /// `trufflehog` or `pattern_scan`.
    pub source: String,
    pub found: usize,
    pub details: Vec<SecretFinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyAudit {
    pub report: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstIssue {
    pub file: String,
    pub line: Option<usize>,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AstData {
    pub issues: Vec<AstIssue>,
    pub total_issues: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LintingResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pylint: Option<ToolReport<PylintData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eslint: Option<ToolReport<EslintData>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeCheckingResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mypy: Option<ToolReport<MypyData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsc: Option<ToolReport<TscData>>,
}

impl TypeCheckingResults {
    /// `(tool, issue count)` for each type checker that ran.
    pub fn issue_counts(&self) -> Vec<(&'static str, usize)> {
        let mut out = Vec::new();
        if let Some(r) = &self.mypy {
            out.push(("mypy", r.data.total_issues));
        }
        if let Some(r) = &self.tsc {
            out.push(("tsc", r.data.total_issues));
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SecurityResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandit: Option<ToolReport<BanditData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<ToolReport<SecretsData>>,
    /// Keyed by ecosystem: `python` (safety) or `npm` (npm audit).
    pub dependencies: BTreeMap<String, ToolReport<DependencyAudit>>,
}

impl SecurityResults {
    pub fn scan_completed(&self) -> bool {
        self.bandit.as_ref().is_some_and(|r| r.status.is_completed())
            || self.secrets.as_ref().is_some_and(|r| r.status.is_completed())
    }

    pub fn findings(&self) -> usize {
        self.bandit.as_ref().map_or(0, |r| r.data.results.len())
            + self.secrets.as_ref().map_or(0, |r| r.data.found)
    }

    /// Files named by bandit results or secret findings.
    pub fn finding_files(&self) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        if let Some(bandit) = &self.bandit {
            files.extend(bandit.data.results.iter().map(|r| r.filename.clone()));
        }
        if let Some(secrets) = &self.secrets {
            files.extend(secrets.data.details.iter().map(|d| d.file.clone()));
        }
        files.retain(|f| !f.is_empty());
        files.sort();
        files.dedup();
        files
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StaticAnalysisResults {
    pub linting: LintingResults,
    pub type_checking: TypeCheckingResults,
    pub security: SecurityResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast_analysis: Option<ToolReport<AstData>>,
}

impl StaticAnalysisResults {
    /// Issues across linting, type checking, and security.
    pub fn total_issues(&self) -> usize {
        let linting = self.linting.pylint.as_ref().map_or(0, |r| r.data.total_issues)
            + self.linting.eslint.as_ref().map_or(0, |r| r.data.total_issues);
        let typing: usize = self.type_checking.issue_counts().iter().map(|(_, n)| n).sum();
        linting + typing + self.security.findings()
    }
}
