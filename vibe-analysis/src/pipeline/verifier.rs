//! The verification pipeline: nine phases run in a fixed order over one
//! repository inventory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use vibe_core::config::ReportConfig;
use vibe_core::constants::VIBE_VERSION;
use vibe_core::errors::{ConfigError, PipelineError, PipelineResult, ScanError};
use vibe_core::events::{
    ErrorEvent, EventDispatcher, Phase, PhaseCompleteEvent, PhaseSkippedEvent, PhaseStartedEvent,
    PipelineCompleteEvent, PipelineStartedEvent,
};
use vibe_core::tracing::metrics;
use vibe_core::{VibeConfig, VibeErrorCode};

use super::types::{exit_code, AnalysisResults};
use crate::complexity::ComplexityAnalyzer;
use crate::docs::DocumentationAnalyzer;
use crate::formal::FormalVerifier;
use crate::git::{GitAnalysis, GitHistoryAnalyzer};
use crate::report::{build_report, write_raw_results};
use crate::sanitize::{RedactLevel, Sanitizer};
use crate::scanner::{RepoInventory, WalkOptions};
use crate::static_analysis::StaticAnalyzer;
use crate::testing::TestRunner;
use crate::tools::{ToolContext, ToolRunner};
use crate::verify::{ClaimVerifier, Evidence, TestEvidence};

/// The sanitizer configured by `report`, or `None` when sanitizing is off.
pub fn sanitizer_for(config: &ReportConfig) -> Result<Option<Sanitizer>, ConfigError> {
    if !config.effective_sanitize() {
        return Ok(None);
    }
    let level: RedactLevel = config.effective_redact_level().parse()?;
    Ok(Some(Sanitizer::new(level)))
}

pub struct VibeVerifier<'a> {
    repo: PathBuf,
    config: &'a VibeConfig,
    runner: &'a dyn ToolRunner,
    events: &'a EventDispatcher,
    sanitizer: Option<Option<Sanitizer>>,
}

impl<'a> VibeVerifier<'a> {
    pub fn new(
        repo: &Path,
        config: &'a VibeConfig,
        runner: &'a dyn ToolRunner,
        events: &'a EventDispatcher,
    ) -> Self {
        Self {
            repo: repo.to_path_buf(),
            config,
            runner,
            events,
            sanitizer: None,
        }
    }

    /// Use `sanitizer` for the raw results instead of the one built from
    /// the report config. `None` disables sanitizing.
    pub fn with_sanitizer(mut self, sanitizer: Option<Sanitizer>) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Run every phase. Only an invalid target, an unreadable repository or
    /// a bad redaction level abort the run; everything else is collected in
    /// the result's errors.
    pub fn run(&self) -> Result<PipelineResult<AnalysisResults>, PipelineError> {
        let started = Instant::now();
        match self.execute() {
            Ok(result) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                self.events.emit_pipeline_complete(&PipelineCompleteEvent {
                    duration_ms,
                    exit_code: exit_code(&result.data),
                    error_count: result.error_count(),
                });
                tracing::info!(
                    duration_ms,
                    errors = result.error_count(),
                    "verification complete"
                );
                Ok(result)
            }
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    fn execute(&self) -> Result<PipelineResult<AnalysisResults>, PipelineError> {
        if !self.repo.is_dir() {
            return Err(PipelineError::InvalidTarget {
                path: self.repo.clone(),
            });
        }
        let root = self
            .repo
            .canonicalize()
            .map_err(|source| ScanError::IoError {
                path: self.repo.clone(),
                source,
            })?;
        let configured;
        let sanitizer = match &self.sanitizer {
            Some(s) => s.as_ref(),
            None => {
                configured = sanitizer_for(&self.config.report)?;
                configured.as_ref()
            }
        };

        self.events.emit_pipeline_started(&PipelineStartedEvent {
            repo_path: root.clone(),
        });
        let _span = tracing::info_span!("verify", repo = %root.display()).entered();

        let mut result = PipelineResult::new(AnalysisResults {
            repo_path: root.display().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: VIBE_VERSION.to_string(),
            ..Default::default()
        });
        let phases = &self.config.phases;
        let quick = phases.effective_quick();

        // 1. Git history
        if self.config.git.effective_enabled() {
            let git = self.phase(Phase::GitHistory, &mut result.errors, || {
                let analysis = GitHistoryAnalyzer::new(&root, &self.config.git)
                    .quick(quick)
                    .analyze()
                    .map_err(PipelineError::from)?;
                let summary = git_summary(&analysis);
                Ok((analysis, summary))
            });
            result.data.git_analysis = Some(git.unwrap_or_else(|| GitAnalysis {
                is_git_repo: true,
                analysis_skipped: true,
                error: Some("git history could not be read".to_string()),
                ..Default::default()
            }));
        } else {
            self.skip(Phase::GitHistory, "disabled by git.enabled");
        }

        // 2. Language detection. The inventory feeds every later phase, so a
        // failed walk is fatal.
        self.started(Phase::LanguageDetection);
        let phase_start = Instant::now();
        let options = WalkOptions::from_config(&self.config.scan);
        let inventory =
            RepoInventory::scan(&root, &options, self.config.scan.effective_max_file_size())?;
        result.data.languages = inventory.language_stats();
        tracing::info!(
            { metrics::FILES_SCANNED } = inventory.files().len(),
            primary = %result.data.languages.primary_language,
            "languages detected"
        );
        self.complete(
            Phase::LanguageDetection,
            phase_start,
            vec![
                format!("Primary language: {}", result.data.languages.primary_language),
                format!("Total files: {}", result.data.languages.total_files),
            ],
        );

        // 3. Documentation
        result.data.documentation = self.phase(Phase::Documentation, &mut result.errors, || {
            let docs = DocumentationAnalyzer::new(&inventory, &self.config.docs)
                .analyze()
                .map_err(PipelineError::from)?;
            tracing::info!(
                { metrics::CLAIMS_EXTRACTED } = docs.summary.total_claims,
                "documentation analyzed"
            );
            let summary = vec![
                format!("Documentation files found: {}", docs.summary.documentation_files),
                format!("Claims extracted: {}", docs.summary.total_claims),
                format!("Verifiable claims: {}", docs.summary.verifiable_claims),
            ];
            Ok((docs, summary))
        })
        .unwrap_or_default();

        // 4. Complexity
        result.data.complexity = self
            .phase(Phase::Complexity, &mut result.errors, || {
                let ctx = self.tools(Phase::Complexity);
                let complexity = ComplexityAnalyzer::new(&inventory, &ctx).analyze();
                let summary = vec![
                    format!("Files analyzed: {}", complexity.summary.total_files),
                    format!(
                        "Average complexity: {:.2}",
                        complexity.summary.average_complexity
                    ),
                ];
                Ok((complexity, summary))
            })
            .unwrap_or_default();

        // 5. Static analysis
        let primary = result.data.languages.primary_language.clone();
        result.data.static_analysis = self
            .phase(Phase::StaticAnalysis, &mut result.errors, || {
                let ctx = self.tools(Phase::StaticAnalysis);
                let analysis = StaticAnalyzer::new(&inventory, &ctx).analyze(&primary);
                let summary = vec![format!(
                    "Total static analysis issues: {}",
                    analysis.total_issues()
                )];
                Ok((analysis, summary))
            })
            .unwrap_or_default();

        // 6. Formal verification
        if phases.run_formal_verification() {
            result.data.formal_verification =
                self.phase(Phase::FormalVerification, &mut result.errors, || {
                    let ctx = self.tools(Phase::FormalVerification);
                    let formal = FormalVerifier::new(&inventory, &ctx).verify();
                    let summary = vec![format!(
                        "Formal verification checks performed: {}",
                        formal.checks_performed()
                    )];
                    Ok((formal, summary))
                });
        } else {
            self.skip(Phase::FormalVerification, skip_reason(quick, "--skip-verification"));
        }

        // 7. Tests
        if phases.run_tests() {
            result.data.tests = self.phase(Phase::Tests, &mut result.errors, || {
                let ctx = self.tools(Phase::Tests);
                let tests = TestRunner::new(&inventory, &ctx, &self.config.tests).run();
                let s = &tests.summary;
                tracing::info!({ metrics::TESTS_EXECUTED } = s.total_tests, "tests finished");
                let mut summary = vec![
                    format!("Test frameworks found: {}", s.frameworks_used.len()),
                    format!("Total tests: {}", s.total_tests),
                ];
                if s.total_tests > 0 {
                    summary.push(format!("Success rate: {:.1}%", s.success_rate));
                }
                Ok((tests, summary))
            });
        } else {
            self.skip(Phase::Tests, skip_reason(quick, "--skip-tests"));
        }

        // 8. Claim verification
        let claims = &result.data.documentation.claims;
        if claims.is_empty() {
            self.skip(Phase::ClaimVerification, "no claims to verify");
        } else {
            let evidence = self.evidence(&inventory, &result.data);
            result.data.claim_verification =
                self.phase(Phase::ClaimVerification, &mut result.errors, || {
                    let verification =
                        ClaimVerifier::with_events(self.events).verify_claims(claims, &evidence);
                    let s = &verification.summary;
                    let summary = vec![
                        format!("Claims verified: {}", s.verified),
                        format!("Claims failed: {}", s.failed),
                        format!("Claims inconclusive: {}", s.inconclusive),
                    ];
                    Ok((verification, summary))
                });
        }

        // 9. Report
        self.started(Phase::Report);
        let phase_start = Instant::now();
        let report = build_report(&result.data, &root);
        let mut summary = vec![
            format!("Health score: {:.1}/100", report.health_score),
            format!("Critical issues: {}", report.critical_issues.len()),
        ];
        result.data.report = Some(report);
        if self.config.report.effective_save_raw_results() {
            let dir = self.config.report.effective_output_dir();
            match write_raw_results(&dir, &result.data, sanitizer) {
                Ok(path) => {
                    let shown = match sanitizer {
                        Some(s) => s.safe_path(&path, &root),
                        None => path.display().to_string(),
                    };
                    summary.push(format!("Raw results saved to: {shown}"));
                }
                Err(e) => {
                    let e = PipelineError::from(e);
                    self.report_error(&e);
                    result.add_error(e);
                }
            }
        }
        self.complete(Phase::Report, phase_start, summary);

        Ok(result)
    }

    fn tools(&self, phase: Phase) -> ToolContext<'_> {
        ToolContext::new(self.runner, self.events, &self.config.tools, phase)
    }

    fn evidence(&self, inventory: &RepoInventory, data: &AnalysisResults) -> Evidence {
        let security = &data.static_analysis.security;
        let mut evidence = Evidence::from_inventory(inventory);
        evidence.security_scan_completed = security.scan_completed();
        evidence.security_findings = security.findings();
        evidence.security_finding_files = security.finding_files().into_iter().collect();
        evidence.tests = data.tests.as_ref().map(|t| TestEvidence {
            total: t.summary.total_tests,
            failed: t.summary.failed,
        });
        evidence
    }

    /// Run one phase with its lifecycle events. A failed phase records the
    /// error and yields `None`.
    fn phase<T>(
        &self,
        phase: Phase,
        errors: &mut Vec<PipelineError>,
        body: impl FnOnce() -> Result<(T, Vec<String>), PipelineError>,
    ) -> Option<T> {
        self.started(phase);
        let start = Instant::now();
        match body() {
            Ok((value, summary)) => {
                self.complete(phase, start, summary);
                Some(value)
            }
            Err(e) => {
                self.report_error(&e);
                self.complete(phase, start, vec![format!("Failed: {e}")]);
                errors.push(e);
                None
            }
        }
    }

    fn started(&self, phase: Phase) {
        tracing::info!(phase = %phase, "phase started");
        self.events.emit_phase_started(&PhaseStartedEvent { phase });
    }

    fn complete(&self, phase: Phase, start: Instant, summary: Vec<String>) {
        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(phase = %phase, { metrics::PHASE_DURATION } = duration_ms, "phase complete");
        self.events.emit_phase_complete(&PhaseCompleteEvent {
            phase,
            duration_ms,
            summary,
        });
    }

    fn skip(&self, phase: Phase, reason: &str) {
        tracing::info!(phase = %phase, reason, "phase skipped");
        self.events.emit_phase_skipped(&PhaseSkippedEvent {
            phase,
            reason: reason.to_string(),
        });
    }

    fn report_error(&self, error: &PipelineError) {
        tracing::warn!(error = %error, code = error.error_code(), "pipeline error");
        self.events.emit_error(&ErrorEvent {
            message: error.to_string(),
            error_code: error.error_code().to_string(),
        });
    }
}

fn skip_reason(quick: bool, flag: &'static str) -> &'static str {
    if quick {
        "quick mode"
    } else {
        flag
    }
}

fn git_summary(analysis: &GitAnalysis) -> Vec<String> {
    if !analysis.is_git_repo {
        return vec!["Not a git repository".to_string()];
    }
    let info = &analysis.repository_info;
    let mut lines = vec![
        format!("Repository age: {} days", info.repo_age_days),
        format!("Total commits: {}", info.total_commits),
        format!(
            "Contributors: {}",
            analysis.contributor_analysis.total_contributors
        ),
    ];
    lines.extend(analysis.insights.iter().cloned());
    lines
}
