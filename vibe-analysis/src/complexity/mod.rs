//! Code complexity metrics.

pub mod analyzer;
pub mod external;
pub mod python;
pub mod types;

pub use analyzer::ComplexityAnalyzer;
pub use types::{
    ComplexityResults, ComplexitySummary, FileMetrics, FunctionComplexity, LanguageComplexity, Rank,
};
