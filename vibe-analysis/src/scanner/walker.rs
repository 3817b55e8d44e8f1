//! Repository walker built on `ignore::WalkBuilder`.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use vibe_core::config::ScanConfig;
use vibe_core::constants::DEFAULT_IGNORE_DIRS;
use vibe_core::errors::ScanError;

/// Options controlling a repository walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Skip `DEFAULT_IGNORE_DIRS`.
    pub default_ignores: bool,
    pub respect_gitignore: bool,
    pub follow_symlinks: bool,
    /// Extra glob patterns matched against root-relative paths.
    pub extra_ignore: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            default_ignores: true,
            respect_gitignore: true,
            follow_symlinks: false,
            extra_ignore: Vec::new(),
        }
    }
}

impl WalkOptions {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            default_ignores: true,
            respect_gitignore: config.effective_respect_gitignore(),
            follow_symlinks: config.effective_follow_symlinks(),
            extra_ignore: config.extra_ignore.clone(),
        }
    }

    /// Every file, including build output and dependency folders.
    /// Used to find artifacts tools leave behind (coverage, JUnit XML).
    pub fn raw() -> Self {
        Self {
            default_ignores: false,
            respect_gitignore: false,
            follow_symlinks: false,
            extra_ignore: vec![".git/**".to_string()],
        }
    }
}

/// Walk `root` and return root-relative file paths, sorted.
pub fn walk_repo(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, ScanError> {
    let extra = build_globset(&options.extra_ignore)?;
    let default_ignores = options.default_ignores;

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .git_global(false)
        .require_git(false)
        .follow_links(options.follow_symlinks)
        .filter_entry(move |entry| {
            if !default_ignores || entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| DEFAULT_IGNORE_DIRS.contains(&name)))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if extra.is_match(relative) {
            continue;
        }
        files.push(relative.to_path_buf());
    }
    files.sort();
    tracing::debug!(root = %root.display(), files_scanned = files.len(), "walk complete");
    Ok(files)
}

/// Compile glob patterns into a `GlobSet`.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidPattern {
        pattern: patterns.join(","),
        message: e.to_string(),
    })
}
