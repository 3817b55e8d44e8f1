//! End-to-end verification run.

pub mod types;
pub mod verifier;

pub use types::{exit_code, AnalysisResults, EXIT_CLAIMS_FAILED, EXIT_TESTS_FAILED};
pub use verifier::{sanitizer_for, VibeVerifier};
