//! Redaction of secrets and identifying details in results.

pub mod patterns;
pub mod sanitizer;

pub use sanitizer::{RedactLevel, Sanitizer, SystemIdentity};
