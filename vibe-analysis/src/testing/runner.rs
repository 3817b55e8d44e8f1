//! Runs each detected framework and gathers counts, JUnit reports and
//! coverage artifacts.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use vibe_core::config::TestConfig;

use super::coverage::detect_coverage;
use super::discovery::discover_frameworks;
use super::frameworks::{is_node_language, OUTPUT_PLACEHOLDER};
use super::parse::{go_test_events, parse_junit_xml, stdout_summary, structured_summary};
use super::types::{FrameworkDetection, FrameworkRun, JunitResults, TestResults};
use crate::scanner::{walk_repo, RepoInventory, WalkOptions};
use crate::tools::{truncate_tail, ToolContext, ToolOutput, ToolReport};

const JAVA_HOME_CANDIDATES: &[&str] = &[
    "/usr/lib/jvm/default-java",
    "/usr/lib/jvm/java-17-openjdk-amd64",
    "/usr/lib/jvm/java-11-openjdk-amd64",
    "/usr/lib/jvm/java-8-openjdk-amd64",
];

pub struct TestRunner<'a> {
    inventory: &'a RepoInventory,
    tools: &'a ToolContext<'a>,
    config: &'a TestConfig,
    npm_installed: Cell<bool>,
}

impl<'a> TestRunner<'a> {
    pub fn new(
        inventory: &'a RepoInventory,
        tools: &'a ToolContext<'a>,
        config: &'a TestConfig,
    ) -> Self {
        Self {
            inventory,
            tools,
            config,
            npm_installed: Cell::new(false),
        }
    }

    pub fn run(&self) -> TestResults {
        let mut results = TestResults {
            discovered_frameworks: discover_frameworks(self.inventory),
            ..TestResults::default()
        };

        for (language, frameworks) in &results.discovered_frameworks {
            for (framework, detection) in frameworks.iter().filter(|(_, d)| d.detected) {
                let report = self.run_framework(language, framework, detection);
                results
                    .test_results
                    .insert(format!("{language}_{framework}"), report);
            }
        }

        let artifacts = match walk_repo(self.inventory.root(), &WalkOptions::raw()) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(error = %e, "could not walk repository for test artifacts");
                Vec::new()
            }
        };
        if let Some(junit) = self.first_junit_report(&artifacts) {
            for report in results.test_results.values_mut() {
                if report.status.is_completed() && report.data.summary.is_empty() {
                    report.data.summary = junit.counts();
                    report.data.junit_results = Some(junit.clone());
                }
            }
        }
        results.coverage = detect_coverage(&artifacts);
        results.summarize();

        tracing::info!(
            tests_executed = results.summary.total_tests,
            failed = results.summary.failed,
            frameworks = results.summary.frameworks_used.len(),
            "test run complete"
        );
        results
    }

    fn run_framework(
        &self,
        language: &str,
        framework: &str,
        detection: &FrameworkDetection,
    ) -> ToolReport<FrameworkRun> {
        let Some((program, args)) = detection.command.split_first() else {
            return ToolReport::failed("empty test command");
        };
        let output_file = match tempfile::Builder::new()
            .prefix("vibe-tests-")
            .suffix(".json")
            .tempfile()
        {
            Ok(f) => f,
            Err(e) => return ToolReport::failed(format!("cannot create output file: {e}")),
        };
        let output_path = output_file.path().to_string_lossy().into_owned();

        let root = self.inventory.root();
        let mut invocation = self
            .tools
            .command(program, root)
            .args(args.iter().map(|a| a.replace(OUTPUT_PLACEHOLDER, &output_path)))
            .timeout(Duration::from_secs(self.config.effective_timeout_secs()));
        for (key, value) in self.environment(language) {
            invocation = invocation.env(key, value);
        }

        match self.tools.invoke(&invocation) {
            Ok(out) => {
                let report = std::fs::read_to_string(output_file.path()).unwrap_or_default();
                ToolReport::completed(self.interpret(language, framework, &out, &report))
            }
            Err(status) => ToolReport::from_status(status),
        }
    }

    fn interpret(
        &self,
        language: &str,
        framework: &str,
        out: &ToolOutput,
        report: &str,
    ) -> FrameworkRun {
        let tail = self.config.effective_output_tail_chars();
        let structured_results = serde_json::from_str::<serde_json::Value>(report).ok();
        let summary = structured_results
            .as_ref()
            .and_then(|r| structured_summary(framework, r))
            .map(|c| c.with_derived_total())
            .or_else(|| (framework == "gotest").then(|| go_test_events(&out.stdout)).flatten())
            .unwrap_or_else(|| stdout_summary(framework, &out.stdout));

        FrameworkRun {
            framework: framework.to_string(),
            language: language.to_string(),
            exit_code: out.exit_code,
            stdout: truncate_tail(&out.stdout, tail),
            stderr: truncate_tail(&out.stderr, tail),
            summary,
            structured_results,
            junit_results: None,
        }
    }

    /// Extra environment for the language, installing node modules first
    /// when needed.
    fn environment(&self, language: &str) -> Vec<(String, String)> {
        let root = self.inventory.root();
        match language {
            "python" => {
                let mut path = root.display().to_string();
                if let Ok(existing) = std::env::var("PYTHONPATH") {
                    if !existing.is_empty() {
                        path.push(if cfg!(windows) { ';' } else { ':' });
                        path.push_str(&existing);
                    }
                }
                vec![("PYTHONPATH".to_string(), path)]
            }
            "java" => find_java_home()
                .map(|home| vec![("JAVA_HOME".to_string(), home)])
                .unwrap_or_default(),
            lang if is_node_language(lang) => {
                self.ensure_node_modules(root);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn ensure_node_modules(&self, root: &Path) {
        if self.npm_installed.get()
            || !self.config.effective_install_node_modules()
            || root.join("node_modules").exists()
        {
            return;
        }
        self.npm_installed.set(true);
        let invocation = self
            .tools
            .command("npm", root)
            .arg("install")
            .timeout(Duration::from_secs(self.config.effective_timeout_secs()));
        if let Err(status) = self.tools.invoke(&invocation) {
            tracing::warn!(?status, "npm install did not complete");
        }
    }

    fn first_junit_report(&self, files: &[PathBuf]) -> Option<JunitResults> {
        let path = files.iter().find(|f| is_junit_report(f))?;
        let xml = std::fs::read_to_string(self.inventory.absolute(path)).ok()?;
        match parse_junit_xml(&xml) {
            Ok(results) => Some(results),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "unreadable JUnit report");
                None
            }
        }
    }
}

/// `TEST-*.xml` anywhere, or any XML directly under `test-results/`.
pub fn is_junit_report(path: &Path) -> bool {
    let is_xml = path.extension().is_some_and(|e| e == "xml");
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let in_results_dir = path
        .parent()
        .and_then(|p| p.file_name())
        .is_some_and(|d| d == "test-results");
    is_xml && (name.starts_with("TEST-") || in_results_dir)
}

fn find_java_home() -> Option<String> {
    if let Ok(home) = std::env::var("JAVA_HOME") {
        if !home.is_empty() {
            return Some(home);
        }
    }
    JAVA_HOME_CANDIDATES
        .iter()
        .find(|p| Path::new(p).exists())
        .map(|p| (*p).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junit_report_names() {
        assert!(is_junit_report(Path::new("target/surefire-reports/TEST-com.a.FooTest.xml")));
        assert!(is_junit_report(Path::new("build/test-results/results.xml")));
        assert!(!is_junit_report(Path::new("pom.xml")));
        assert!(!is_junit_report(Path::new("TEST-notes.txt")));
    }
}
