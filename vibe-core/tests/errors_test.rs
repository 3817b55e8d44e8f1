//! Tests for error codes and pipeline error aggregation.

use std::path::PathBuf;

use vibe_core::errors::*;

#[test]
fn test_every_error_has_a_code() {
    let errors: Vec<Box<dyn Fn() -> (String, &'static str)>> = vec![
        Box::new(|| {
            let e = ConfigError::ValidationFailed {
                field: "report.redact_level".into(),
                message: "bad".into(),
            };
            (e.coded_string(), e.error_code())
        }),
        Box::new(|| {
            let e = ToolError::Timeout {
                program: "pytest".into(),
                timeout_secs: 300,
            };
            (e.coded_string(), e.error_code())
        }),
        Box::new(|| {
            let e = GitError::NotARepository { path: "/tmp/x".into() };
            (e.coded_string(), e.error_code())
        }),
    ];

    let expected = ["CONFIG_ERROR", "TOOL_TIMEOUT", "GIT_ERROR"];
    for (make, code) in errors.iter().zip(expected) {
        let (formatted, actual) = make();
        assert_eq!(actual, code);
        assert!(
            formatted.starts_with(&format!("[{code}] ")),
            "coded string should start with the code: {formatted}"
        );
    }
}

#[test]
fn test_tool_error_codes_distinguish_causes() {
    let missing = ToolError::NotFound { program: "bandit".into() };
    let failed = ToolError::Failed {
        program: "bandit".into(),
        message: "exit 2".into(),
    };
    assert_eq!(missing.error_code(), error_code::TOOL_NOT_FOUND);
    assert_eq!(failed.error_code(), error_code::TOOL_FAILED);
}

#[test]
fn test_pipeline_error_delegates_code() {
    let err: PipelineError = ParseError::MalformedOutput {
        tool: "pylint".into(),
        format: "json".into(),
        message: "eof".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::PARSE_ERROR);
    assert!(err.to_string().contains("pylint"));

    let invalid = PipelineError::InvalidTarget { path: PathBuf::from("/missing") };
    assert_eq!(invalid.error_code(), error_code::INVALID_TARGET);
}

#[test]
fn test_pipeline_result_collects_non_fatal_errors() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1, 2]);
    assert!(result.is_clean());

    result.add_error(GitError::Operation {
        operation: "revwalk".into(),
        message: "corrupt".into(),
    }
    .into());
    result.add_error(ToolError::NotFound { program: "mypy".into() }.into());

    assert_eq!(result.error_count(), 2);
    assert!(!result.is_clean());
    assert_eq!(result.data, vec![1, 2]);
}
