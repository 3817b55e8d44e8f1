//! Git history analysis: activity, churn, contributors, documentation
//! freshness and release tags.

pub mod analysis;
pub mod history;
pub mod types;

pub use analysis::{analyze_snapshot, CommitRecord, HistorySnapshot, TagRecord};
pub use history::GitHistoryAnalyzer;
pub use types::*;
