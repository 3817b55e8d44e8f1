//! Console summary printed at the end of a run.

use std::fmt::Write;

use super::types::Severity;
use crate::pipeline::AnalysisResults;

const RULE_WIDTH: usize = 60;

/// Renders the end-of-run summary for a terminal.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.use_color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn heading(&self, out: &mut String, title: &str) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.paint(title, "1"));
    }

    pub fn render(&self, results: &AnalysisResults) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "VIBE VERIFIER ANALYSIS SUMMARY");
        let _ = writeln!(out, "{rule}");

        self.heading(&mut out, "COMPLEXITY ANALYSIS");
        let summary = &results.complexity.summary;
        let _ = writeln!(out, "  Files analyzed: {}", summary.total_files);
        let _ = writeln!(out, "  Total lines: {}", summary.total_loc);
        let _ = writeln!(out, "  Average complexity: {:.2}", summary.average_complexity);
        let populated: Vec<_> = summary
            .complexity_distribution
            .iter()
            .filter(|(_, n)| **n > 0)
            .collect();
        if !populated.is_empty() {
            let _ = writeln!(out, "  Complexity distribution:");
            for (bucket, count) in populated {
                let _ = writeln!(out, "    {bucket}: {count} functions");
            }
        }

        self.heading(&mut out, "TEST ANALYSIS");
        match results.tests.as_ref().map(|t| &t.summary) {
            None => {
                let _ = writeln!(out, "  Tests not run");
            }
            Some(s) if s.total_tests == 0 => {
                let _ = writeln!(out, "  {}", self.paint("No tests found!", "33"));
            }
            Some(s) => {
                let _ = writeln!(out, "  Total tests: {}", s.total_tests);
                let _ = writeln!(out, "  Passed: {}", self.paint(&s.passed.to_string(), "32"));
                let failed = if s.failed > 0 {
                    self.paint(&s.failed.to_string(), "31")
                } else {
                    s.failed.to_string()
                };
                let _ = writeln!(out, "  Failed: {failed}");
                let _ = writeln!(out, "  Success rate: {:.1}%", s.success_rate);
            }
        }

        self.heading(&mut out, "SECURITY ANALYSIS");
        let security = &results.static_analysis.security;
        if let Some(bandit) = security.bandit.as_ref().filter(|r| r.status.is_completed()) {
            let _ = writeln!(out, "  Security issues found: {}", bandit.data.results.len());
        }
        if let Some(secrets) = &security.secrets {
            if secrets.data.found > 0 {
                let line = format!("Potential secrets found: {}", secrets.data.found);
                let _ = writeln!(out, "  {}", self.paint(&line, "33"));
            }
        }
        if !security.scan_completed() {
            let _ = writeln!(out, "  No security scanner completed");
        }

        let typing = results.static_analysis.type_checking.issue_counts();
        if !typing.is_empty() {
            self.heading(&mut out, "TYPE CHECKING");
            for (tool, count) in typing {
                let _ = writeln!(out, "  {tool}: {count} issues");
            }
        }

        if let Some(claims) = &results.claim_verification {
            self.heading(&mut out, "CLAIM VERIFICATION");
            let s = &claims.summary;
            let _ = writeln!(out, "  Claims: {}", s.total_claims);
            let _ = writeln!(out, "  Verified: {}", s.verified);
            let _ = writeln!(out, "  Failed: {}", s.failed);
            let _ = writeln!(out, "  Inconclusive: {}", s.inconclusive);
        }

        if let Some(report) = &results.report {
            self.heading(&mut out, "OVERALL");
            let code = match report.health_score {
                s if s >= 80.0 => "32",
                s if s >= 50.0 => "33",
                _ => "31",
            };
            let score = format!("{:.1}/100", report.health_score);
            let _ = writeln!(out, "  Health score: {}", self.paint(&score, code));
            let _ = writeln!(
                out,
                "  Critical issues: {} ({} critical, {} high)",
                report.critical_issues.len(),
                report.count_by_severity(Severity::Critical),
                report.count_by_severity(Severity::High),
            );
            let _ = writeln!(out, "  Recommendations: {}", report.recommendations.len());
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
        out
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}
