//! Test-run result types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tools::ToolReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl TestCounts {
    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.passed == 0 && self.failed == 0 && self.skipped == 0
    }

    /// Fill `total` from the parts when the tool did not report one.
    pub fn with_derived_total(mut self) -> Self {
        if self.total == 0 {
            self.total = self.passed + self.failed + self.skipped;
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JunitSuite {
    pub name: String,
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
    pub time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JunitResults {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub time: f64,
    pub suites: Vec<JunitSuite>,
}

impl JunitResults {
    pub fn counts(&self) -> TestCounts {
        TestCounts {
            total: self.total,
            passed: self.passed,
            failed: self.failed + self.errors,
            skipped: self.skipped,
        }
    }
}

/// Whether a framework was found and what it would run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameworkDetection {
    pub detected: bool,
    pub files: Vec<String>,
    pub command: Vec<String>,
    pub config_files: Vec<String>,
}

/// One framework's test run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameworkRun {
    pub framework: String,
    pub language: String,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub summary: TestCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_results: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub junit_results: Option<JunitResults>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TestSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub success_rate: f64,
    /// `language_framework` for every detected framework.
    pub frameworks_used: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TestResults {
    pub discovered_frameworks: BTreeMap<String, BTreeMap<String, FrameworkDetection>>,
    pub test_results: BTreeMap<String, ToolReport<FrameworkRun>>,
    /// Language → coverage artifacts found.
    pub coverage: BTreeMap<String, Vec<String>>,
    pub summary: TestSummary,
}

impl TestResults {
    pub fn summarize(&mut self) {
        let mut totals = TestCounts::default();
        for report in self.test_results.values() {
            let s = report.data.summary;
            totals.total += s.total;
            totals.passed += s.passed;
            totals.failed += s.failed;
            totals.skipped += s.skipped;
        }
        let frameworks_used = self
            .discovered_frameworks
            .iter()
            .flat_map(|(lang, fws)| {
                fws.iter()
                    .filter(|(_, d)| d.detected)
                    .map(move |(fw, _)| format!("{lang}_{fw}"))
            })
            .collect();
        self.summary = TestSummary {
            total_tests: totals.total,
            passed: totals.passed,
            failed: totals.failed,
            skipped: totals.skipped,
            success_rate: if totals.total > 0 {
                totals.passed as f64 / totals.total as f64 * 100.0
            } else {
                0.0
            },
            frameworks_used,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_sums_runs_and_lists_frameworks() {
        let mut results = TestResults::default();
        results.discovered_frameworks.entry("python".into()).or_default().insert(
            "pytest".into(),
            FrameworkDetection {
                detected: true,
                ..Default::default()
            },
        );
        results.discovered_frameworks.entry("python".into()).or_default().insert(
            "nose".into(),
            FrameworkDetection::default(),
        );
        results.test_results.insert(
            "python_pytest".into(),
            ToolReport::completed(FrameworkRun {
                summary: TestCounts {
                    total: 4,
                    passed: 3,
                    failed: 1,
                    skipped: 0,
                },
                ..Default::default()
            }),
        );
        results.summarize();
        assert_eq!(results.summary.total_tests, 4);
        assert_eq!(results.summary.failed, 1);
        assert_eq!(results.summary.success_rate, 75.0);
        assert_eq!(results.summary.frameworks_used, vec!["python_pytest"]);
    }

    #[test]
    fn no_tests_means_zero_rate() {
        let mut results = TestResults::default();
        results.summarize();
        assert_eq!(results.summary.success_rate, 0.0);
    }
}
