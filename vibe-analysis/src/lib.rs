//! # vibe-analysis
//!
//! Analysis engine for vibe-verifier: repository scanning, documentation
//! claim extraction, external tool orchestration, test execution, git
//! history, claim verification against the collected evidence, and the
//! report that ties them together.

pub mod complexity;
pub mod docs;
pub mod formal;
pub mod git;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod sanitize;
pub mod scanner;
pub mod static_analysis;
pub mod testing;
pub mod tools;
pub mod verify;

pub use pipeline::{exit_code, AnalysisResults, VibeVerifier};
