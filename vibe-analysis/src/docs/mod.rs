//! Documentation analysis and claim extraction.

pub mod analyzer;
pub mod code_index;
pub mod discovery;
pub mod extractor;
pub mod patterns;
pub mod references;
pub mod types;

pub use analyzer::DocumentationAnalyzer;
pub use code_index::CodeIndex;
pub use discovery::find_documentation_files;
pub use types::{
    Claim, ClaimType, DocsRecommendation, DocsSummary, DocumentationResults, VerificationMethod,
};
