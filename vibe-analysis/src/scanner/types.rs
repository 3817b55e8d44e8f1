//! Scanner result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-language file counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageShare {
    pub count: usize,
    pub percentage: f64,
    /// Paths relative to the repository root.
    pub files: Vec<String>,
}

/// Result of language detection over a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageStats {
    /// Keyed by display name (`Python`, `C++`, ...).
    pub languages: BTreeMap<String, LanguageShare>,
    pub total_files: usize,
    pub primary_language: String,
}

impl LanguageStats {
    pub fn has(&self, name: &str) -> bool {
        self.languages.contains_key(name)
    }
}

/// Primary language reported when no recognised source files exist.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";
