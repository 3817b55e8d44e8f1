//! Git history analysis results.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryInfo {
    pub current_branch: Option<String>,
    pub remote_url: Option<String>,
    pub last_commit: Option<String>,
    pub total_commits: usize,
    pub repo_age_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_commit_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitPatterns {
    pub features: usize,
    pub fixes: usize,
    pub documentation: usize,
    pub refactoring: usize,
    pub tests: usize,
    pub breaking_changes: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CommitHistory {
    pub commits_by_month: BTreeMap<String, usize>,
    pub commits_by_author: BTreeMap<String, usize>,
    pub commit_patterns: CommitPatterns,
    pub average_commits_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChanges {
    pub file: String,
    pub changes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedFile {
    pub file: String,
    pub added_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FileHistory {
    pub most_changed_files: Vec<FileChanges>,
    pub recently_added_files: Vec<AddedFile>,
    pub total_files_changed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocUpdate {
    pub file: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutdatedDoc {
    pub file: String,
    pub days_since_update: i64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentationSync {
    pub documentation_files: usize,
    pub last_doc_updates: Vec<DocUpdate>,
    pub readme_days_since_update: Option<i64>,
    /// Code-file changes in the churn window.
    pub recent_code_changes: usize,
    pub potentially_outdated_docs: Vec<OutdatedDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub name: String,
    pub commits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOwner {
    pub file: String,
    pub primary_maintainer: String,
    pub commits: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContributorAnalysis {
    pub contributors: Vec<Contributor>,
    pub total_contributors: usize,
    pub bus_factor: usize,
    pub file_ownership: Vec<FileOwner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleFile {
    pub file: String,
    pub days_since_change: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StabilityAnalysis {
    pub high_churn_files: Vec<FileChanges>,
    pub potentially_abandoned_files: Vec<StaleFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureCommit {
    pub date: String,
    pub feature: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureTimeline {
    pub recent_features: Vec<FeatureCommit>,
    pub features_per_month: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionDetail {
    pub version: String,
    pub sha: String,
    pub date: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VersionAnalysis {
    pub has_versions: bool,
    pub total_versions: usize,
    pub latest_version: Option<String>,
    pub versions: Vec<VersionDetail>,
    pub follows_semver: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct GitVerificationIssue {
    pub severity: IssueSeverity,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub evidence: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GitAnalysis {
    pub is_git_repo: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub analysis_skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub repository_info: RepositoryInfo,
    pub commit_history: CommitHistory,
    pub file_history: FileHistory,
    pub documentation_sync: DocumentationSync,
    pub contributor_analysis: ContributorAnalysis,
    pub stability_analysis: StabilityAnalysis,
    pub feature_timeline: FeatureTimeline,
    pub version_analysis: VersionAnalysis,
    pub insights: Vec<String>,
    pub verification_issues: Vec<GitVerificationIssue>,
}

impl GitAnalysis {
    pub fn not_a_repository() -> Self {
        Self {
            is_git_repo: false,
            analysis_skipped: true,
            error: Some("Not a git repository".to_string()),
            ..Self::default()
        }
    }
}
