//! Health scoring, critical issue triage and recommendations.

use std::path::Path;

use super::types::{CriticalIssue, Priority, Recommendation, ReportSummary, Severity};
use crate::complexity::{ComplexityResults, Rank};
use crate::pipeline::AnalysisResults;
use crate::static_analysis::StaticAnalysisResults;
use crate::testing::TestResults;
use crate::verify::ClaimVerification;

const COMPLEXITY_THRESHOLD: u32 = 20;
const CI_CONFIG_PATHS: &[&str] = &[
    ".github/workflows",
    ".gitlab-ci.yml",
    "Jenkinsfile",
    ".travis.yml",
    "azure-pipelines.yml",
];

/// Score, issues and recommendations for a finished run.
pub fn build_report(results: &AnalysisResults, root: &Path) -> ReportSummary {
    ReportSummary {
        health_score: health_score(
            &results.complexity,
            &results.static_analysis,
            results.tests.as_ref(),
        ),
        critical_issues: critical_issues(
            &results.complexity,
            &results.static_analysis,
            results.tests.as_ref(),
            results.claim_verification.as_ref(),
        ),
        recommendations: recommendations(
            &results.complexity,
            &results.static_analysis,
            results.tests.as_ref(),
            root,
        ),
    }
}

/// Repository health from 0 to 100.
///
/// A run without executed tests loses a flat 20 points; otherwise the
/// failure share is weighted at 0.3 per percent.
pub fn health_score(
    complexity: &ComplexityResults,
    static_analysis: &StaticAnalysisResults,
    tests: Option<&TestResults>,
) -> f64 {
    let mut score = 100.0_f64;

    let avg = complexity.summary.average_complexity;
    if avg > 10.0 {
        score -= ((avg - 10.0) * 2.0).min(20.0);
    }

    let dist = &complexity.summary.complexity_distribution;
    let very_complex = [Rank::E, Rank::F]
        .iter()
        .map(|r| dist.get(r.bucket()).copied().unwrap_or(0))
        .sum::<usize>();
    if very_complex > 0 {
        score -= (very_complex as f64 * 3.0).min(15.0);
    }

    match tests.map(|t| &t.summary).filter(|s| s.total_tests > 0) {
        Some(summary) => score -= (100.0 - summary.success_rate) * 0.3,
        None => score -= 20.0,
    }

    let findings = static_analysis.security.findings();
    if findings > 0 {
        score -= (findings as f64 * 2.0).min(25.0);
    }

    score.max(0.0)
}

pub fn critical_issues(
    complexity: &ComplexityResults,
    static_analysis: &StaticAnalysisResults,
    tests: Option<&TestResults>,
    claims: Option<&ClaimVerification>,
) -> Vec<CriticalIssue> {
    let mut issues = Vec::new();

    for (path, func) in complexity.functions_above(COMPLEXITY_THRESHOLD) {
        issues.push(CriticalIssue {
            kind: "high_complexity".to_string(),
            severity: Severity::High,
            location: format!("{path}:{}", func.lineno),
            description: format!(
                "Function '{}' has complexity {} (threshold: {COMPLEXITY_THRESHOLD})",
                func.name, func.complexity
            ),
            recommendation: "Refactor this function to reduce complexity".to_string(),
        });
    }

    let security = &static_analysis.security;
    if let Some(bandit) = &security.bandit {
        for finding in &bandit.data.results {
            let severity = match finding.issue_severity.to_uppercase().as_str() {
                "HIGH" => Severity::High,
                "MEDIUM" => Severity::Medium,
                _ => continue,
            };
            let description = if finding.issue_text.is_empty() {
                "Security issue detected".to_string()
            } else {
                finding.issue_text.clone()
            };
            issues.push(CriticalIssue {
                kind: "security_vulnerability".to_string(),
                severity,
                location: format!("{}:{}", finding.filename, finding.line_number),
                description,
                recommendation: "Review and fix this security vulnerability".to_string(),
            });
        }
    }

    if let Some(secrets) = &security.secrets {
        for secret in &secrets.data.details {
            issues.push(CriticalIssue {
                kind: "hardcoded_secret".to_string(),
                severity: Severity::Critical,
                location: secret.file.clone(),
                description: format!("Potential {} found", secret.kind),
                recommendation: "Remove hardcoded secrets and use environment variables or secret management systems".to_string(),
            });
        }
    }

    if let Some(tests) = tests {
        if tests.summary.failed > 0 {
            issues.push(CriticalIssue {
                kind: "test_failures".to_string(),
                severity: Severity::High,
                location: "test suite".to_string(),
                description: format!("{} tests are failing", tests.summary.failed),
                recommendation: "Fix failing tests to ensure code reliability".to_string(),
            });
        }
    }

    for (tool, count) in static_analysis.type_checking.issue_counts() {
        if count > 0 {
            issues.push(CriticalIssue {
                kind: "type_errors".to_string(),
                severity: Severity::Medium,
                location: format!("{tool} type checking"),
                description: format!("{count} type errors found"),
                recommendation: "Fix type errors to improve code reliability".to_string(),
            });
        }
    }

    if let Some(claims) = claims {
        for outcome in &claims.failed {
            issues.push(CriticalIssue {
                kind: "failed_claim".to_string(),
                severity: Severity::Medium,
                location: "documentation".to_string(),
                description: format!("Claim failed verification: {}", outcome.claim),
                recommendation: "Correct the documentation or fix the code so the claim holds"
                    .to_string(),
            });
        }
    }

    issues
}

pub fn recommendations(
    complexity: &ComplexityResults,
    static_analysis: &StaticAnalysisResults,
    tests: Option<&TestResults>,
    root: &Path,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    let has_framework = tests.is_some_and(|t| !t.summary.frameworks_used.is_empty());
    if !has_framework {
        out.push(Recommendation::new(
            "Testing",
            Priority::High,
            "No test framework detected. Implement unit tests to ensure code reliability.",
            "Set up a testing framework appropriate for your language (pytest, jest, JUnit, etc.)",
        ));
    } else if tests.map_or(0, |t| t.summary.total_tests) < 10 {
        out.push(Recommendation::new(
            "Testing",
            Priority::Medium,
            "Low test count detected. Increase test coverage.",
            "Write more comprehensive tests covering edge cases and main functionality",
        ));
    }

    if complexity.summary.average_complexity > 15.0 {
        out.push(Recommendation::new(
            "Code Quality",
            Priority::High,
            "High average code complexity detected.",
            "Refactor complex functions, extract methods, and simplify logic",
        ));
    }

    if !static_analysis.security.scan_completed() {
        out.push(Recommendation::new(
            "Security",
            Priority::High,
            "No security analysis performed.",
            "Run security scanning tools (bandit, gosec, etc.) appropriate for your language",
        ));
    }

    // Only files with comment metrics are judged.
    let undocumented = complexity
        .files
        .values()
        .filter(|m| match (m.comments, m.sloc) {
            (Some(comments), Some(sloc)) => (comments as f64) < sloc as f64 * 0.1,
            _ => false,
        })
        .count();
    if undocumented > 5 {
        out.push(Recommendation::new(
            "Documentation",
            Priority::Medium,
            "Many files lack sufficient documentation.",
            "Add docstrings and comments to improve code maintainability",
        ));
    }

    if !CI_CONFIG_PATHS.iter().any(|p| root.join(p).exists()) {
        out.push(Recommendation::new(
            "DevOps",
            Priority::Medium,
            "No CI/CD configuration detected.",
            "Set up continuous integration to automatically run tests and checks",
        ));
    }

    out
}
