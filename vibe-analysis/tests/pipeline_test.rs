//! End-to-end pipeline runs against temporary repositories, with external
//! tools scripted through `ToolRunner`.

mod common;

use common::{python_project, recorder, write, ScriptedRunner};
use vibe_analysis::pipeline::{exit_code, VibeVerifier, EXIT_CLAIMS_FAILED, EXIT_TESTS_FAILED};
use vibe_analysis::sanitize::{RedactLevel, Sanitizer, SystemIdentity};
use vibe_core::constants::RAW_RESULTS_FILE;
use vibe_core::errors::PipelineError;
use vibe_core::events::Phase;
use vibe_core::VibeConfig;

fn phase_names(prefix: &str) -> Vec<String> {
    Phase::ALL.iter().map(|p| format!("{prefix}:{p:?}")).collect()
}

#[test]
fn test_missing_target_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let config = VibeConfig::default();
    let runner = ScriptedRunner::empty();
    let (recorder, events) = recorder();

    let err = VibeVerifier::new(&missing, &config, &runner, &events)
        .run()
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidTarget { .. }));
    assert_eq!(*recorder.errors.lock().unwrap(), vec!["INVALID_TARGET".to_string()]);
    assert!(recorder.log().is_empty());
}

#[test]
fn test_file_target_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("README.md");
    std::fs::write(&file, "hello").unwrap();
    let config = VibeConfig::default();
    let runner = ScriptedRunner::empty();
    let (_recorder, events) = recorder();

    let result = VibeVerifier::new(&file, &config, &runner, &events).run();
    assert!(matches!(result, Err(PipelineError::InvalidTarget { .. })));
}

#[test]
fn test_full_run_visits_every_phase_in_order() {
    let dir = tempfile::tempdir().unwrap();
    python_project(dir.path());
    let config = VibeConfig::default();
    let runner = ScriptedRunner::empty().with_tool(
        "pytest",
        1,
        "test_greeter.py::test_greet PASSED\n==== 3 passed, 1 failed in 0.12s ====\n",
    );
    let (recorder, events) = recorder();

    let result = VibeVerifier::new(dir.path(), &config, &runner, &events)
        .run()
        .unwrap();

    let log = recorder.log();
    let started: Vec<String> = log.iter().filter(|l| l.starts_with("started:")).cloned().collect();
    let completed: Vec<String> = log.iter().filter(|l| l.starts_with("complete:")).cloned().collect();
    assert_eq!(started, phase_names("started"));
    assert_eq!(completed, phase_names("complete"));

    let data = &result.data;
    assert_eq!(data.languages.primary_language, "Python");
    assert!(data.documentation.summary.total_claims >= 2);
    assert!(data.complexity.files.contains_key("greeter.py"));
    assert!(data.formal_verification.is_some());

    let tests = data.tests.as_ref().unwrap();
    assert_eq!(tests.summary.total_tests, 4);
    assert_eq!(tests.summary.failed, 1);
    assert!(tests.summary.frameworks_used.contains(&"python_pytest".to_string()));
    assert!(runner.calls().iter().any(|c| c.starts_with("pytest")));

    let report = data.report.as_ref().unwrap();
    assert!(report.critical_issues.iter().any(|i| i.kind == "test_failures"));
    assert!(report.health_score < 100.0);

    assert_eq!(exit_code(data), EXIT_TESTS_FAILED);
    assert_eq!(*recorder.exit_codes.lock().unwrap(), vec![EXIT_TESTS_FAILED]);
    assert!(recorder
        .summary_for(Phase::LanguageDetection)
        .contains(&"Primary language: Python".to_string()));
}

#[test]
fn test_quick_mode_skips_formal_and_tests() {
    let dir = tempfile::tempdir().unwrap();
    python_project(dir.path());
    let mut config = VibeConfig::default();
    config.phases.quick = Some(true);
    let runner = ScriptedRunner::empty().with_tool("pytest", 0, "1 passed");
    let (recorder, events) = recorder();

    let result = VibeVerifier::new(dir.path(), &config, &runner, &events)
        .run()
        .unwrap();

    let log = recorder.log();
    assert!(log.contains(&"skipped:FormalVerification".to_string()));
    assert!(log.contains(&"skipped:Tests".to_string()));
    assert!(!log.contains(&"started:Tests".to_string()));
    assert!(runner.calls().is_empty());

    let data = &result.data;
    assert!(data.tests.is_none());
    assert!(data.formal_verification.is_none());

    // The undefined API in the README cannot be backed by code.
    let claims = data.claim_verification.as_ref().unwrap();
    assert!(claims.summary.failed >= 1);
    assert_eq!(exit_code(data), EXIT_CLAIMS_FAILED);
}

#[test]
fn test_skip_flags_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    python_project(dir.path());
    let mut config = VibeConfig::default();
    config.phases.skip_tests = Some(true);
    config.git.enabled = Some(false);
    let runner = ScriptedRunner::empty();
    let (recorder, events) = recorder();

    let result = VibeVerifier::new(dir.path(), &config, &runner, &events)
        .run()
        .unwrap();

    let log = recorder.log();
    assert!(log.contains(&"skipped:GitHistory".to_string()));
    assert!(log.contains(&"skipped:Tests".to_string()));
    assert!(log.contains(&"complete:FormalVerification".to_string()));
    assert!(result.data.git_analysis.is_none());
    assert!(result.data.formal_verification.is_some());
}

#[test]
fn test_non_repository_reports_skipped_history() {
    let dir = tempfile::tempdir().unwrap();
    python_project(dir.path());
    let config = VibeConfig::default();
    let runner = ScriptedRunner::empty();
    let (recorder, events) = recorder();

    let result = VibeVerifier::new(dir.path(), &config, &runner, &events)
        .run()
        .unwrap();
    let git = result.data.git_analysis.as_ref().unwrap();
    assert!(!git.is_git_repo);
    assert!(git.analysis_skipped);
    assert_eq!(
        recorder.summary_for(Phase::GitHistory),
        vec!["Not a git repository".to_string()]
    );
    assert!(result.is_clean());
}

#[test]
fn test_raw_results_are_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");
    std::fs::create_dir_all(&repo).unwrap();
    python_project(&repo);
    let out = dir.path().join("out");

    let mut config = VibeConfig::default();
    config.phases.quick = Some(true);
    config.report.save_raw_results = Some(true);
    config.report.output_dir = Some(out.clone());
    let runner = ScriptedRunner::empty();
    let (recorder, events) = recorder();

    let canonical = repo.canonicalize().unwrap().display().to_string();
    let sanitizer = Sanitizer::with_identity(
        RedactLevel::High,
        SystemIdentity {
            home_dir: Some(canonical.clone()),
            username: None,
            hostname: None,
        },
    );

    VibeVerifier::new(&repo, &config, &runner, &events)
        .with_sanitizer(Some(sanitizer))
        .run()
        .unwrap();

    let written = std::fs::read_to_string(out.join(RAW_RESULTS_FILE)).unwrap();
    assert!(!written.contains(&canonical));
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(json.get("report").is_some());
    assert!(json.get("tests").is_none());
    assert!(recorder
        .summary_for(Phase::Report)
        .iter()
        .any(|l| l.starts_with("Raw results saved to:")));
}

#[test]
fn test_unicode_indented_docstring_does_not_abort_run() {
    let dir = tempfile::tempdir().unwrap();
    python_project(dir.path());
    write(
        dir.path(),
        "app.py",
        "def handle():\n    \"\"\"Handles requests.\n     one space\n    \u{a0}nbsp line\n    \"\"\"\n    return 1\n",
    );
    let mut config = VibeConfig::default();
    config.phases.quick = Some(true);
    let runner = ScriptedRunner::empty();
    let (_recorder, events) = recorder();

    let result = VibeVerifier::new(dir.path(), &config, &runner, &events)
        .run()
        .unwrap();
    assert!(result.data.complexity.files.contains_key("app.py"));
}
