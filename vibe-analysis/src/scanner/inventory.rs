//! File inventory of a target repository, built once per run.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use vibe_core::errors::ScanError;

use super::language_detect::Language;
use super::types::{LanguageShare, LanguageStats, UNKNOWN_LANGUAGE};
use super::walker::{walk_repo, WalkOptions};

/// Root-relative paths of every non-ignored file, indexed by language.
#[derive(Debug, Clone)]
pub struct RepoInventory {
    root: PathBuf,
    files: Vec<PathBuf>,
    by_language: FxHashMap<Language, Vec<PathBuf>>,
    max_file_size: u64,
}

impl RepoInventory {
    pub fn scan(root: &Path, options: &WalkOptions, max_file_size: u64) -> Result<Self, ScanError> {
        let files = walk_repo(root, options)?;
        Ok(Self::from_files(root, files, max_file_size))
    }

    pub fn from_files(root: &Path, files: Vec<PathBuf>, max_file_size: u64) -> Self {
        let mut by_language: FxHashMap<Language, Vec<PathBuf>> = FxHashMap::default();
        for file in &files {
            if let Some(lang) = Language::from_path(file) {
                by_language.entry(lang).or_default().push(file.clone());
            }
        }
        Self {
            root: root.to_path_buf(),
            files,
            by_language,
            max_file_size,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn files_of(&self, language: Language) -> &[PathBuf] {
        self.by_language
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_language(&self, language: Language) -> bool {
        !self.files_of(language).is_empty()
    }

    /// Files whose extension is one of `extensions` (without dots).
    pub fn with_extensions<'a>(
        &'a self,
        extensions: &'a [&'a str],
    ) -> impl Iterator<Item = &'a PathBuf> + 'a {
        self.files.iter().filter(move |f| {
            f.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e))
        })
    }

    pub fn absolute(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Read a file as UTF-8, skipping files above the size limit.
    /// Returns `None` for unreadable, oversized or non-UTF-8 files.
    pub fn read(&self, relative: &Path) -> Option<String> {
        let path = self.root.join(relative);
        let meta = std::fs::metadata(&path).ok()?;
        if meta.len() > self.max_file_size {
            tracing::debug!(path = %relative.display(), size = meta.len(), "skipping oversized file");
            return None;
        }
        std::fs::read_to_string(&path).ok()
    }

    /// Count files per language, compute percentages, and pick the primary language.
    pub fn language_stats(&self) -> LanguageStats {
        let total: usize = self.by_language.values().map(Vec::len).sum();
        let mut stats = LanguageStats {
            total_files: total,
            primary_language: UNKNOWN_LANGUAGE.to_string(),
            ..Default::default()
        };

        for (lang, files) in &self.by_language {
            let percentage = if total > 0 {
                files.len() as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            stats.languages.insert(
                lang.name().to_string(),
                LanguageShare {
                    count: files.len(),
                    percentage: (percentage * 100.0).round() / 100.0,
                    files: files.iter().map(|f| f.display().to_string()).collect(),
                },
            );
        }

        // BTreeMap iteration is name-ordered, so ties resolve alphabetically.
        let mut best: Option<(&String, usize)> = None;
        for (name, share) in &stats.languages {
            if best.map_or(true, |(_, count)| share.count > count) {
                best = Some((name, share.count));
            }
        }
        if let Some((name, _)) = best {
            stats.primary_language = name.clone();
        }
        stats
    }
}

/// Walk `root` with default options and report language statistics.
pub fn detect_languages(root: &Path) -> Result<LanguageStats, ScanError> {
    Ok(RepoInventory::scan(root, &WalkOptions::default(), u64::MAX)?.language_stats())
}
