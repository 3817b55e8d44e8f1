//! Symbol and keyword index over the repository's code files.

use std::path::PathBuf;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::patterns::{compiled, RE_DEFINITION};
use crate::scanner::RepoInventory;

/// Extensions searched when correlating claims with code.
pub const CODE_EXTENSIONS: &[&str] = &["py", "js", "ts", "java", "cpp", "go", "rs"];

/// Keywords that tie a security claim to code.
pub const SECURITY_KEYWORDS: &[&str] = &[
    "auth", "encrypt", "decrypt", "validate", "sanitize", "token", "password", "hash", "salt",
    "verify", "secure",
];

struct IndexedFile {
    path: String,
    lowercase: String,
    /// Bit `i` set when `SECURITY_KEYWORDS[i]` occurs in the file.
    security_hits: u16,
}

/// Built once per run; answers "which files define X" and "which file
/// mentions keyword Y".
pub struct CodeIndex {
    files: Vec<IndexedFile>,
    symbols: FxHashMap<String, Vec<usize>>,
    security: Option<AhoCorasick>,
}

impl CodeIndex {
    pub fn build(inventory: &RepoInventory) -> Self {
        let paths: Vec<&PathBuf> = inventory.with_extensions(CODE_EXTENSIONS).collect();
        let sources: Vec<(String, String)> = paths
            .par_iter()
            .filter_map(|rel| {
                let content = inventory.read(rel)?;
                Some((rel.display().to_string(), content))
            })
            .collect();
        Self::from_sources(sources)
    }

    /// Index in-memory `(path, content)` pairs.
    pub fn from_sources(sources: Vec<(String, String)>) -> Self {
        let security = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(SECURITY_KEYWORDS)
            .ok();

        let mut files = Vec::with_capacity(sources.len());
        let mut symbols: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (idx, (path, content)) in sources.into_iter().enumerate() {
            if let Some(re) = compiled(&RE_DEFINITION) {
                for caps in re.captures_iter(&content) {
                    let entry = symbols.entry(caps[1].to_string()).or_default();
                    if entry.last() != Some(&idx) {
                        entry.push(idx);
                    }
                }
            }
            let security_hits = security
                .as_ref()
                .map(|ac| keyword_mask(ac, &content))
                .unwrap_or(0);
            files.push(IndexedFile {
                path,
                lowercase: content.to_lowercase(),
                security_hits,
            });
        }
        tracing::debug!(files = files.len(), symbols = symbols.len(), "built code index");
        Self {
            files,
            symbols,
            security,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files that define `name` as a def/class/function/func/fn.
    pub fn files_defining(&self, name: &str) -> impl Iterator<Item = &str> {
        self.symbols
            .get(name)
            .into_iter()
            .flatten()
            .map(|&i| self.files[i].path.as_str())
    }

    /// First file (in walk order) whose text contains `keyword`, case-insensitively.
    pub fn first_file_containing(&self, keyword: &str) -> Option<&str> {
        let needle = keyword.to_lowercase();
        self.files
            .iter()
            .find(|f| f.lowercase.contains(&needle))
            .map(|f| f.path.as_str())
    }

    /// For each security keyword in `text`, the first file that also uses it.
    pub fn security_matches(&self, text: &str) -> Vec<&str> {
        let Some(ac) = &self.security else {
            return Vec::new();
        };
        let claim_mask = keyword_mask(ac, text);
        let mut out = Vec::new();
        for bit in 0..SECURITY_KEYWORDS.len() {
            if claim_mask & (1 << bit) == 0 {
                continue;
            }
            if let Some(file) = self.files.iter().find(|f| f.security_hits & (1 << bit) != 0) {
                out.push(file.path.as_str());
            }
        }
        out
    }
}

fn keyword_mask(ac: &AhoCorasick, haystack: &str) -> u16 {
    ac.find_overlapping_iter(haystack)
        .fold(0u16, |mask, m| mask | (1 << m.pattern().as_usize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CodeIndex {
        CodeIndex::from_sources(vec![
            ("src/app.py".into(), "class Engine:\n    def start(self):\n        pass\n".into()),
            ("src/auth.go".into(), "func Login() {}\n// hashes the Password\n".into()),
            ("web/index.js".into(), "function start() { return Engine; }\n".into()),
        ])
    }

    #[test]
    fn finds_definitions_across_languages() {
        let idx = index();
        let start: Vec<&str> = idx.files_defining("start").collect();
        assert_eq!(start, vec!["src/app.py", "web/index.js"]);
        assert_eq!(idx.files_defining("Login").collect::<Vec<_>>(), vec!["src/auth.go"]);
        assert_eq!(idx.files_defining("missing").count(), 0);
    }

    #[test]
    fn keyword_search_is_case_insensitive() {
        let idx = index();
        assert_eq!(idx.first_file_containing("ENGINE"), Some("src/app.py"));
        assert_eq!(idx.first_file_containing("nothing"), None);
    }

    #[test]
    fn security_keywords_map_to_files() {
        let idx = index();
        assert_eq!(idx.security_matches("Passwords are hashed"), vec!["src/auth.go", "src/auth.go"]);
        assert!(idx.security_matches("fast startup").is_empty());
    }
}
