//! Runs the built `vibe-verifier` binary against temporary repositories.

use std::path::Path;
use std::process::{Command, Output};

fn vibe(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vibe-verifier"))
        .args(args)
        .current_dir(cwd)
        .env_remove("VIBE_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_repository_exits_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = vibe(&["does-not-exist", "--quick"], dir.path());
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[INVALID_TARGET]"), "stderr: {stderr}");
}

#[test]
fn test_invalid_config_file_exits_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("repo")).unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[report]\nredact_level = \"extreme\"\n").unwrap();
    let output = vibe(&["repo", "--config", "bad.toml"], dir.path());
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_json_output_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");
    std::fs::create_dir(&repo).unwrap();
    std::fs::write(repo.join("README.md"), "# Empty\n\nNothing to see here.\n").unwrap();

    let output = vibe(
        &["repo", "--quick", "--skip-tests", "--format", "json", "--redact-level", "high"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.get("complexity").is_some());
    assert!(json.get("report").is_some());
    assert!(json.get("tests").is_none());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Phase 1: Analyzing git history"));
    assert!(stderr.contains("skipped (quick mode)"));
}

#[test]
fn test_console_summary_and_raw_results() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");
    std::fs::create_dir(&repo).unwrap();
    std::fs::write(repo.join("main.py"), "def main():\n    return 0\n").unwrap();

    let output = vibe(
        &["repo", "--quick", "--save-raw-results", "-o", "out"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("VIBE VERIFIER ANALYSIS SUMMARY"));
    assert!(stdout.contains("Health score:"));
    assert!(dir.path().join("out").join("raw_results.json").is_file());
}
