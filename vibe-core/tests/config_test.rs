//! Tests for the layered configuration system.

use std::sync::Mutex;

use vibe_core::config::vibe_config::{CliOverrides, VibeConfig};
use vibe_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all VIBE_ env vars and point HOME at an empty directory so a
/// developer's own user config cannot leak into assertions.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "VIBE_SKIP_TESTS",
        "VIBE_SKIP_VERIFICATION",
        "VIBE_QUICK",
        "VIBE_TOOL_TIMEOUT_SECS",
        "VIBE_TEST_TIMEOUT_SECS",
        "VIBE_SCAN_MAX_FILE_SIZE",
        "VIBE_GIT_MAX_COMMITS",
        "VIBE_SANITIZE",
        "VIBE_REDACT_LEVEL",
        "VIBE_OUTPUT_DIR",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".vibe-verifier");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[tools]\ntimeout_secs = 10\n\n[git]\nmax_commits = 50\n",
    )
    .unwrap();

    let repo = tempdir();
    std::fs::write(
        repo.path().join("vibe-verifier.toml"),
        "[tools]\ntimeout_secs = 20\n\n[report]\nredact_level = \"low\"\n",
    )
    .unwrap();

    std::env::set_var("VIBE_REDACT_LEVEL", "high");

    let cli = CliOverrides {
        skip_tests: Some(true),
        ..Default::default()
    };
    let config = VibeConfig::load(repo.path(), None, Some(&cli)).unwrap();

    // User layer survives where nothing overrides it
    assert_eq!(config.git.max_commits, Some(50));
    // Project beats user
    assert_eq!(config.tools.timeout_secs, Some(20));
    // Env beats project
    assert_eq!(config.report.effective_redact_level(), "high");
    // CLI applied
    assert!(!config.phases.run_tests());

    std::env::remove_var("VIBE_REDACT_LEVEL");
}

#[test]
fn test_defaults_without_files() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());
    let repo = tempdir();

    let config = VibeConfig::load(repo.path(), None, None).unwrap();
    assert!(config.report.effective_sanitize());
    assert_eq!(config.report.effective_redact_level(), "medium");
    assert_eq!(config.report.effective_format(), "console");
    assert!(!config.report.effective_save_raw_results());
    assert_eq!(config.tests.effective_timeout_secs(), 300);
    assert_eq!(config.tests.effective_output_tail_chars(), 5000);
    assert_eq!(config.tools.effective_crosshair_timeout_secs(), 60);
    assert!(config.phases.run_tests());
    assert!(config.phases.run_formal_verification());
    assert_eq!(config.git.effective_max_commits(), 10_000);
}

#[test]
fn test_explicit_config_file_overrides_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let repo = tempdir();
    std::fs::write(
        repo.path().join("vibe-verifier.toml"),
        "[phases]\nquick = false\n",
    )
    .unwrap();
    let explicit = repo.path().join("ci.toml");
    std::fs::write(&explicit, "[phases]\nquick = true\n").unwrap();

    let config = VibeConfig::load(repo.path(), Some(&explicit), None).unwrap();
    assert!(config.phases.effective_quick());
    assert!(!config.phases.run_tests(), "quick mode must skip tests");
    assert!(!config.phases.run_formal_verification());
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());
    let repo = tempdir();

    let missing = repo.path().join("nope.toml");
    let err = VibeConfig::load(repo.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_invalid_toml_reports_path() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let repo = tempdir();
    std::fs::write(repo.path().join("vibe-verifier.toml"), "[report\nsanitize = ").unwrap();
    let err = VibeConfig::load(repo.path(), None, None).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("vibe-verifier.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_bad_values() {
    let bad_level = VibeConfig::from_toml("[report]\nredact_level = \"extreme\"\n").unwrap();
    let err = VibeConfig::validate(&bad_level).unwrap_err();
    assert!(
        matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "report.redact_level"),
        "got {err:?}"
    );

    let zero_timeout = VibeConfig::from_toml("[tests]\ntimeout_secs = 0\n").unwrap();
    assert!(VibeConfig::validate(&zero_timeout).is_err());

    let bad_threshold =
        VibeConfig::from_toml("[docs]\nhigh_confidence_threshold = 1.5\n").unwrap();
    assert!(VibeConfig::validate(&bad_threshold).is_err());

    let bad_format = VibeConfig::from_toml("[report]\nformat = \"pdf\"\n").unwrap();
    assert!(VibeConfig::validate(&bad_format).is_err());
}

#[test]
fn test_env_values_that_do_not_parse_are_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());
    let repo = tempdir();

    std::env::set_var("VIBE_TOOL_TIMEOUT_SECS", "soon");
    std::env::set_var("VIBE_SKIP_VERIFICATION", "true");
    let config = VibeConfig::load(repo.path(), None, None).unwrap();
    assert_eq!(config.tools.timeout_secs, None);
    assert!(!config.phases.run_formal_verification());

    std::env::remove_var("VIBE_TOOL_TIMEOUT_SECS");
    std::env::remove_var("VIBE_SKIP_VERIFICATION");
}

#[test]
fn test_toml_round_trip_preserves_values() {
    let config = VibeConfig::from_toml(
        "[tools]\ndisabled = [\"trufflehog\"]\n\n[report]\noutput_dir = \"out\"\n",
    )
    .unwrap();
    assert!(config.tools.is_disabled("trufflehog"));
    let back = VibeConfig::from_toml(&config.to_toml().unwrap()).unwrap();
    assert_eq!(back.report.effective_output_dir(), std::path::PathBuf::from("out"));
    assert!(back.tools.is_disabled("trufflehog"));
}
