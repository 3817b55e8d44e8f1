//! Structured span field names.
//!
//! Standard field names used in tracing spans across the pipeline so log
//! output can be filtered and aggregated consistently.

/// Pipeline: phase wall time in milliseconds.
pub const PHASE_DURATION: &str = "phase_duration";

/// Tools: external tool wall time in milliseconds.
pub const TOOL_DURATION: &str = "tool_duration";

/// Scanner: number of files visited by a walk.
pub const FILES_SCANNED: &str = "files_scanned";

/// Docs: number of claims extracted.
pub const CLAIMS_EXTRACTED: &str = "claims_extracted";

/// Testing: number of tests executed across frameworks.
pub const TESTS_EXECUTED: &str = "tests_executed";
