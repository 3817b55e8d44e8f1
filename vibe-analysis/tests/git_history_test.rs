//! Git history analysis over repositories built with git2.

mod common;

use std::path::Path;

use git2::{Repository, Signature, Time};
use vibe_analysis::git::GitHistoryAnalyzer;
use vibe_core::config::GitConfig;

const DAY: i64 = 86_400;

fn commit(repo: &Repository, author: &str, days_ago: i64, message: &str, files: &[(&str, &str)]) {
    let root = repo.workdir().unwrap().to_path_buf();
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        common::write(&root, path, content);
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let when = Time::new(chrono::Utc::now().timestamp() - days_ago * DAY, 0);
    let sig = Signature::new(author, &format!("{}@example.com", author.to_lowercase()), &when).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

fn fixture(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();
    commit(
        &repo,
        "Ada",
        30,
        "Add greeter module",
        &[("greeter.py", "def greet():\n    pass\n"), ("README.md", "# Greeter\n")],
    );
    commit(&repo, "Ada", 20, "Fix greeting bug", &[("greeter.py", "def greet():\n    return 1\n")]);
    commit(
        &repo,
        "Brian",
        10,
        "feat: implement farewell",
        &[("farewell.py", "def bye():\n    pass\n")],
    );
    {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag_lightweight("v1.0.0", head.as_object(), false).unwrap();
    }
    repo
}

#[test]
fn test_non_repository_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let analysis = GitHistoryAnalyzer::new(dir.path(), &GitConfig::default())
        .analyze()
        .unwrap();
    assert!(!analysis.is_git_repo);
    assert!(analysis.analysis_skipped);
    assert!(analysis.error.is_some());
}

#[test]
fn test_empty_repository_has_no_commits() {
    let dir = tempfile::tempdir().unwrap();
    Repository::init(dir.path()).unwrap();
    let analysis = GitHistoryAnalyzer::new(dir.path(), &GitConfig::default())
        .analyze()
        .unwrap();
    assert!(analysis.is_git_repo);
    assert_eq!(analysis.repository_info.total_commits, 0);
}

#[test]
fn test_history_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let _repo = fixture(dir.path());

    let analysis = GitHistoryAnalyzer::new(dir.path(), &GitConfig::default())
        .analyze()
        .unwrap();

    assert!(analysis.is_git_repo);
    let info = &analysis.repository_info;
    assert_eq!(info.total_commits, 3);
    assert_eq!(info.repo_age_days, 20);
    assert!(info.last_commit.is_some());

    let patterns = analysis.commit_history.commit_patterns;
    assert_eq!(patterns.features, 2);
    assert_eq!(patterns.fixes, 1);

    assert_eq!(analysis.commit_history.commits_by_author.get("Ada"), Some(&2));
    assert_eq!(analysis.contributor_analysis.total_contributors, 2);
    assert_eq!(analysis.contributor_analysis.contributors[0].name, "Ada");

    let most_changed = &analysis.file_history.most_changed_files;
    assert_eq!(most_changed[0].file, "greeter.py");
    assert_eq!(most_changed[0].changes, 2);

    let versions = &analysis.version_analysis;
    assert!(versions.has_versions);
    assert_eq!(versions.latest_version.as_deref(), Some("v1.0.0"));
    assert!(versions.follows_semver);
}

#[test]
fn test_max_commits_bounds_the_walk() {
    let dir = tempfile::tempdir().unwrap();
    let _repo = fixture(dir.path());
    let config = GitConfig {
        max_commits: Some(2),
        ..GitConfig::default()
    };

    let analysis = GitHistoryAnalyzer::new(dir.path(), &config).analyze().unwrap();
    assert_eq!(analysis.repository_info.total_commits, 2);
}

#[test]
fn test_quick_mode_skips_ownership() {
    let dir = tempfile::tempdir().unwrap();
    let _repo = fixture(dir.path());

    let analysis = GitHistoryAnalyzer::new(dir.path(), &GitConfig::default())
        .quick(true)
        .analyze()
        .unwrap();
    assert!(analysis.contributor_analysis.file_ownership.is_empty());
    assert!(analysis.stability_analysis.potentially_abandoned_files.is_empty());
}
