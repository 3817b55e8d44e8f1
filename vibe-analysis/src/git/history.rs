//! Reads commit history, tracked files and tags through libgit2.

use std::path::{Path, PathBuf};

use git2::{Delta, ErrorCode, ObjectType, Repository, Sort, TreeWalkMode, TreeWalkResult};
use vibe_core::config::GitConfig;
use vibe_core::errors::GitError;

use super::analysis::{analyze_snapshot, CommitRecord, HistorySnapshot, TagRecord};
use super::types::GitAnalysis;

fn op(operation: &'static str) -> impl Fn(git2::Error) -> GitError {
    move |e| GitError::Operation {
        operation: operation.to_string(),
        message: e.message().to_string(),
    }
}

pub struct GitHistoryAnalyzer {
    path: PathBuf,
    max_commits: usize,
    quick: bool,
}

impl GitHistoryAnalyzer {
    pub fn new(path: &Path, config: &GitConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            max_commits: config.effective_max_commits(),
            quick: false,
        }
    }

    pub fn quick(mut self, quick: bool) -> Self {
        self.quick = quick;
        self
    }

    /// A target outside any repository is not an error; it yields a
    /// skipped analysis.
    pub fn analyze(&self) -> Result<GitAnalysis, GitError> {
        let repo = match Repository::discover(&self.path) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::info!(path = %self.path.display(), "not a git repository, skipping history");
                return Ok(GitAnalysis::not_a_repository());
            }
            Err(e) => return Err(op("discover")(e)),
        };
        let snapshot = self.snapshot(&repo)?;
        tracing::info!(
            commits = snapshot.commits.len(),
            tags = snapshot.tags.len(),
            "git history read"
        );
        Ok(analyze_snapshot(&snapshot, self.quick))
    }

    pub fn snapshot(&self, repo: &Repository) -> Result<HistorySnapshot, GitError> {
        let mut snapshot = HistorySnapshot {
            now: chrono::Utc::now().timestamp(),
            remote_url: repo
                .find_remote("origin")
                .ok()
                .and_then(|r| r.url().map(str::to_string)),
            ..HistorySnapshot::default()
        };

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                tracing::debug!("repository has no commits");
                return Ok(snapshot);
            }
            Err(e) => return Err(op("head")(e)),
        };
        if head.is_branch() {
            snapshot.branch = head.shorthand().map(str::to_string);
        }
        snapshot.head_sha = head.target().map(|oid| oid.to_string());

        snapshot.commits = self.commits(repo)?;
        snapshot.tracked_files = tracked_files(repo)?;
        snapshot.tags = tags(repo)?;
        Ok(snapshot)
    }

    fn commits(&self, repo: &Repository) -> Result<Vec<CommitRecord>, GitError> {
        let mut walk = repo.revwalk().map_err(op("revwalk"))?;
        walk.push_head().map_err(op("revwalk"))?;
        walk.set_sorting(Sort::TIME).map_err(op("revwalk"))?;

        let mut records = Vec::new();
        for oid in walk.take(self.max_commits) {
            let oid = oid.map_err(op("revwalk"))?;
            let commit = repo.find_commit(oid).map_err(op("find_commit"))?;
            let author = commit.author();
            let mut record = CommitRecord {
                sha: oid.to_string(),
                time: author.when().seconds(),
                author: author.name().unwrap_or("unknown").to_string(),
                summary: commit.summary().unwrap_or("").to_string(),
                is_merge: commit.parent_count() > 1,
                ..CommitRecord::default()
            };
            if !record.is_merge {
                let tree = commit.tree().map_err(op("tree"))?;
                let parent_tree = match commit.parent(0) {
                    Ok(parent) => Some(parent.tree().map_err(op("tree"))?),
                    Err(_) => None,
                };
                let diff = repo
                    .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
                    .map_err(op("diff"))?;
                for delta in diff.deltas() {
                    let file = delta.new_file().path().or_else(|| delta.old_file().path());
                    let Some(path) = file.and_then(|p| p.to_str()) else {
                        continue;
                    };
                    if delta.status() == Delta::Added {
                        record.added.push(path.to_string());
                    }
                    record.changed.push(path.to_string());
                }
            }
            records.push(record);
        }
        Ok(records)
    }
}

/// Blob paths in HEAD's tree.
fn tracked_files(repo: &Repository) -> Result<Vec<String>, GitError> {
    let tree = repo
        .head()
        .and_then(|h| h.peel_to_tree())
        .map_err(op("head_tree"))?;
    let mut files = Vec::new();
    tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
        if entry.kind() == Some(ObjectType::Blob) {
            if let Some(name) = entry.name() {
                files.push(format!("{dir}{name}"));
            }
        }
        TreeWalkResult::Ok
    })
    .map_err(op("tree_walk"))?;
    Ok(files)
}

fn tags(repo: &Repository) -> Result<Vec<TagRecord>, GitError> {
    let names = repo.tag_names(None).map_err(op("tag_names"))?;
    let mut records = Vec::new();
    for name in names.iter().flatten() {
        let commit = repo
            .revparse_single(&format!("refs/tags/{name}"))
            .and_then(|obj| obj.peel_to_commit());
        match commit {
            Ok(commit) => records.push(TagRecord {
                name: name.to_string(),
                sha: commit.id().to_string(),
                time: commit.author().when().seconds(),
                summary: commit.summary().unwrap_or("").to_string(),
            }),
            Err(e) => tracing::debug!(tag = name, error = %e, "tag does not point at a commit"),
        }
    }
    Ok(records)
}
