//! Health scoring, console summary and the raw results artifact.

pub mod console;
pub mod health;
pub mod types;
pub mod writer;

pub use console::ConsoleReporter;
pub use health::{build_report, critical_issues, health_score, recommendations};
pub use types::{CriticalIssue, Priority, Recommendation, ReportSummary, Severity};
pub use writer::write_raw_results;
