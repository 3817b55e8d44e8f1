//! Documentation file discovery.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use vibe_core::errors::ScanError;

use crate::scanner::RepoInventory;

/// Root-level file name patterns, matched case-insensitively.
const ROOT_DOC_PATTERNS: &[&str] = &[
    "README*",
    "DOCUMENTATION*",
    "GUIDE*",
    "MANUAL*",
    "API*",
    "*.md",
    "*.rst",
    "*.txt",
];

/// Any file directly inside one of these directories is documentation.
const DOC_DIRS: &[&str] = &["docs", "doc", "wiki"];

const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "svg", "webp", "pdf", "zip", "gz", "tgz", "tar",
    "bz2", "xz", "7z", "rar", "jar", "exe", "dll", "so", "dylib", "o", "a", "pyc", "class",
    "woff", "woff2", "ttf", "otf", "eot", "mp3", "mp4", "mov", "wav",
];

fn root_globset() -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in ROOT_DOC_PATTERNS {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| ScanError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidPattern {
        pattern: ROOT_DOC_PATTERNS.join(","),
        message: e.to_string(),
    })
}

fn is_binary(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| BINARY_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn in_doc_dir(path: &Path) -> bool {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .is_some_and(|n| DOC_DIRS.contains(&n))
}

/// Documentation files in the inventory, sorted and de-duplicated.
pub fn find_documentation_files(inventory: &RepoInventory) -> Result<Vec<PathBuf>, ScanError> {
    let root_patterns = root_globset()?;
    let mut docs: Vec<PathBuf> = inventory
        .files()
        .iter()
        .filter(|rel| !is_binary(rel))
        .filter(|rel| {
            let at_root = rel.components().count() == 1;
            (at_root && root_patterns.is_match(rel)) || in_doc_dir(rel)
        })
        .cloned()
        .collect();
    docs.sort();
    docs.dedup();
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(files: &[&str]) -> RepoInventory {
        RepoInventory::from_files(
            Path::new("/repo"),
            files.iter().map(PathBuf::from).collect(),
            u64::MAX,
        )
    }

    #[test]
    fn selects_root_docs_and_doc_dirs() {
        let inv = inventory(&[
            "Readme.rst",
            "CHANGES.md",
            "main.py",
            "src/notes.md",
            "docs/guide.html",
            "docs/logo.png",
            "pkg/wiki/Home.md",
            "api_reference",
        ]);
        let docs = find_documentation_files(&inv).unwrap();
        let names: Vec<String> = docs.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(
            names,
            vec!["CHANGES.md", "Readme.rst", "api_reference", "docs/guide.html", "pkg/wiki/Home.md"]
        );
    }
}
