//! Test discovery and execution across languages and frameworks.

pub mod coverage;
pub mod discovery;
pub mod frameworks;
pub mod parse;
pub mod runner;
pub mod types;

pub use discovery::discover_frameworks;
pub use frameworks::{FrameworkSpec, FRAMEWORKS};
pub use runner::TestRunner;
pub use types::{
    FrameworkDetection, FrameworkRun, JunitResults, JunitSuite, TestCounts, TestResults,
    TestSummary,
};
