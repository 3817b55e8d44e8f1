//! Framework detection from indicator files and package manifests.

use std::collections::BTreeMap;
use std::path::Path;

use globset::{Glob, GlobMatcher};

use super::frameworks::{is_node_language, source_languages, FrameworkSpec, FRAMEWORKS};
use super::types::FrameworkDetection;
use crate::scanner::RepoInventory;

const MAX_INDICATOR_MATCHES: usize = 5;

/// Every probed framework, keyed by table language then framework name.
/// Languages without source files are not probed.
pub fn discover_frameworks(
    inventory: &RepoInventory,
) -> BTreeMap<String, BTreeMap<String, FrameworkDetection>> {
    let node_deps = package_json_dependencies(inventory.root());
    let mut discovered: BTreeMap<String, BTreeMap<String, FrameworkDetection>> = BTreeMap::new();

    for spec in FRAMEWORKS {
        let has_sources = source_languages(spec.language)
            .iter()
            .any(|lang| inventory.has_language(*lang));
        if !has_sources {
            continue;
        }
        let mut detection = detect(spec, inventory);
        if is_node_language(spec.language) {
            let typed = format!("@types/{}", spec.name);
            if node_deps.iter().any(|d| d == spec.name || *d == typed) {
                detection.detected = true;
                detection.files.push("package.json".to_string());
            }
        }
        if detection.detected {
            tracing::debug!(language = spec.language, framework = spec.name, "test framework detected");
        }
        discovered
            .entry(spec.language.to_string())
            .or_default()
            .insert(spec.name.to_string(), detection);
    }
    discovered
}

fn detect(spec: &FrameworkSpec, inventory: &RepoInventory) -> FrameworkDetection {
    let mut files = Vec::new();
    for indicator in spec.indicators {
        if indicator.contains('*') {
            let Some(matcher) = indicator_matcher(indicator) else {
                continue;
            };
            let matches = inventory
                .files()
                .iter()
                .filter(|rel| {
                    matcher.is_match(rel.as_path())
                        || rel.file_name().is_some_and(|name| matcher.is_match(name))
                })
                .take(MAX_INDICATOR_MATCHES)
                .map(|rel| rel.display().to_string());
            files.extend(matches);
        } else if inventory.root().join(indicator).exists() {
            files.push((*indicator).to_string());
        }
    }
    FrameworkDetection {
        detected: !files.is_empty(),
        files,
        command: spec.command.iter().map(|s| (*s).to_string()).collect(),
        config_files: spec.config_files.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn indicator_matcher(pattern: &str) -> Option<GlobMatcher> {
    Glob::new(pattern).ok().map(|g| g.compile_matcher())
}

/// Names from `dependencies` and `devDependencies`.
pub fn package_json_dependencies(root: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(root.join("package.json")) else {
        return Vec::new();
    };
    let Ok(manifest) = serde_json::from_str::<serde_json::Value>(&content) else {
        tracing::debug!("package.json is not valid JSON");
        return Vec::new();
    };
    ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|key| manifest.get(*key).and_then(|v| v.as_object()))
        .flat_map(|deps| deps.keys().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn inventory(dir: &Path, files: &[(&str, &str)]) -> RepoInventory {
        for (rel, content) in files {
            let path = dir.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        RepoInventory::from_files(
            dir,
            files.iter().map(|(rel, _)| PathBuf::from(rel)).collect(),
            1 << 20,
        )
    }

    #[test]
    fn glob_indicator_matches_nested_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let inv = inventory(dir.path(), &[("pkg/mod.py", ""), ("tests/test_mod.py", "")]);
        let found = discover_frameworks(&inv);
        let pytest = &found["python"]["pytest"];
        assert!(pytest.detected);
        assert_eq!(pytest.files, vec!["tests/test_mod.py"]);
        assert!(!found["python"]["nose"].detected);
        assert!(!found.contains_key("go"));
    }

    #[test]
    fn package_json_dev_dependency_counts() {
        let dir = tempfile::tempdir().unwrap();
        let inv = inventory(
            dir.path(),
            &[
                ("index.js", "module.exports = 1;"),
                ("package.json", r#"{"devDependencies": {"@types/mocha": "10"}}"#),
            ],
        );
        let found = discover_frameworks(&inv);
        assert!(found["javascript"]["mocha"].detected);
        assert!(!found["javascript"]["jest"].detected);
    }
}
