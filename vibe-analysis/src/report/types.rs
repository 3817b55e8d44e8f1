//! Report artifacts derived from the analysis results.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A problem that needs attention before the project's claims can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub location: String,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub recommendation: String,
    pub action: String,
}

impl Recommendation {
    pub(crate) fn new(category: &str, priority: Priority, recommendation: &str, action: &str) -> Self {
        Self {
            category: category.to_string(),
            priority,
            recommendation: recommendation.to_string(),
            action: action.to_string(),
        }
    }
}

/// Health score plus the findings that drove it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSummary {
    /// 0 to 100.
    pub health_score: f64,
    pub critical_issues: Vec<CriticalIssue>,
    pub recommendations: Vec<Recommendation>,
}

impl ReportSummary {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.critical_issues
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    }
}
