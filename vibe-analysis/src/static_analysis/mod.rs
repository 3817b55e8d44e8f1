//! Static analysis: linters, type checkers, security scanners, AST checks.

pub mod analyzer;
pub mod ast_checks;
pub mod linters;
pub mod security;
pub mod types;

pub use analyzer::StaticAnalyzer;
pub use types::*;
