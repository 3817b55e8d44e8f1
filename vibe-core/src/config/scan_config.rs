//! Repository walk configuration.

use serde::{Deserialize, Serialize};

/// Configuration for walking the target repository.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Files larger than this are skipped when reading content. Default: 1MB.
    pub max_file_size: Option<u64>,
    /// Extra directory or glob patterns to ignore.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Honor `.gitignore` files in the target. Default: true.
    pub respect_gitignore: Option<bool>,
}

impl ScanConfig {
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }
}
