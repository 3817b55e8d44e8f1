//! Aggregated results of a verification run.

use serde::Serialize;

use crate::complexity::ComplexityResults;
use crate::docs::DocumentationResults;
use crate::formal::FormalResults;
use crate::git::GitAnalysis;
use crate::report::ReportSummary;
use crate::scanner::LanguageStats;
use crate::static_analysis::StaticAnalysisResults;
use crate::testing::TestResults;
use crate::verify::ClaimVerification;

/// Exit code when at least one test failed.
pub const EXIT_TESTS_FAILED: i32 = 1;
/// Exit code when tests passed but a documentation claim failed.
pub const EXIT_CLAIMS_FAILED: i32 = 2;

/// Everything a run produced. Skipped phases leave their field `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResults {
    pub repo_path: String,
    pub timestamp: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_analysis: Option<GitAnalysis>,
    pub languages: LanguageStats,
    pub documentation: DocumentationResults,
    pub complexity: ComplexityResults,
    pub static_analysis: StaticAnalysisResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formal_verification: Option<FormalResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<TestResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_verification: Option<ClaimVerification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportSummary>,
}

/// Process exit code for a finished run: failing tests win over failing
/// claims.
pub fn exit_code(results: &AnalysisResults) -> i32 {
    if results.tests.as_ref().is_some_and(|t| t.summary.failed > 0) {
        EXIT_TESTS_FAILED
    } else if results
        .claim_verification
        .as_ref()
        .is_some_and(|c| c.summary.failed > 0)
    {
        EXIT_CLAIMS_FAILED
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_failures(tests_failed: usize, claims_failed: usize) -> AnalysisResults {
        let mut results = AnalysisResults::default();
        let mut tests = TestResults::default();
        tests.summary.failed = tests_failed;
        results.tests = Some(tests);
        let mut claims = ClaimVerification::default();
        claims.summary.failed = claims_failed;
        results.claim_verification = Some(claims);
        results
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(&AnalysisResults::default()), 0);
        assert_eq!(exit_code(&with_failures(0, 0)), 0);
        assert_eq!(exit_code(&with_failures(0, 3)), EXIT_CLAIMS_FAILED);
        assert_eq!(exit_code(&with_failures(2, 3)), EXIT_TESTS_FAILED);
    }

    #[test]
    fn skipped_phases_are_omitted_from_json() {
        let json = serde_json::to_value(AnalysisResults::default()).unwrap();
        assert!(json.get("tests").is_none());
        assert!(json.get("formal_verification").is_none());
        assert!(json.get("complexity").is_some());
    }
}
