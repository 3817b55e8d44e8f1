//! Source parsers and external tool output formats.

pub mod eslint;
pub mod python;

pub use eslint::{parse_eslint_report, EslintFileReport, EslintMessage};
pub use python::{Definition, DefinitionKind, PythonModule, PythonParser};
