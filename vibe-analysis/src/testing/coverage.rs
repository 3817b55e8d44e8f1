//! Coverage artifacts left in the repository by earlier runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use globset::Glob;

const MAX_ARTIFACTS_PER_PATTERN: usize = 5;

/// Language → glob patterns over root-relative paths.
pub const COVERAGE_PATTERNS: &[(&str, &[&str])] = &[
    ("python", &["**/coverage.xml", "**/.coverage", "**/htmlcov/index.html"]),
    ("javascript", &["**/coverage/**", "**/lcov.info", "**/coverage-final.json"]),
    ("java", &["**/target/site/jacoco/index.html", "**/build/reports/jacoco/**/index.html"]),
    ("go", &["**/coverage.out", "**/coverage.html"]),
    ("csharp", &["**/TestResults/*/coverage.cobertura.xml"]),
    ("rust", &["**/tarpaulin-report.xml", "**/lcov.info"]),
];

/// Match `files` (a raw walk of the repo) against the coverage patterns.
pub fn detect_coverage(files: &[PathBuf]) -> BTreeMap<String, Vec<String>> {
    let mut found: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (language, patterns) in COVERAGE_PATTERNS {
        for pattern in *patterns {
            let Ok(glob) = Glob::new(pattern) else {
                continue;
            };
            let matcher = glob.compile_matcher();
            let hits: Vec<String> = files
                .iter()
                .filter(|f| matcher.is_match(f.as_path()))
                .take(MAX_ARTIFACTS_PER_PATTERN)
                .map(|f| f.display().to_string())
                .collect();
            if !hits.is_empty() {
                found.entry((*language).to_string()).or_default().extend(hits);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_artifacts_by_language() {
        let files: Vec<PathBuf> = ["coverage.xml", "src/app.py", "coverage/lcov-report/index.html"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let found = detect_coverage(&files);
        assert_eq!(found["python"], vec!["coverage.xml"]);
        assert_eq!(found["javascript"], vec!["coverage/lcov-report/index.html"]);
        assert!(!found.contains_key("go"));
    }
}
