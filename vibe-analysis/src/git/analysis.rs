//! Aggregations over a snapshot of commit history. Nothing here touches
//! the repository, so every rule can be exercised with plain records.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::DateTime;
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use rustc_hash::FxHashMap;

use super::types::*;

pub const SECS_PER_DAY: i64 = 86_400;
const HISTORY_WINDOW_DAYS: i64 = 365;
const CHURN_WINDOW_DAYS: i64 = 180;
const RECENTLY_ADDED_DAYS: i64 = 90;
const YOUNG_REPO_DAYS: i64 = 90;
const README_STALE_DAYS: i64 = 30;
const CODE_CHURN_THRESHOLD: usize = 10;
const HIGH_CHURN_CHANGES: usize = 5;
const ABANDONED_DAYS: i64 = 365;
const ABANDONED_CANDIDATES: usize = 100;
const BUS_FACTOR_SHARE: f64 = 0.1;
const SEMVER_COMPLIANCE: f64 = 0.8;

const CODE_EXTENSIONS: &[&str] = &["py", "js", "java", "go", "rs", "cpp", "c"];
const ABANDONED_EXTENSIONS: &[&str] = &["py", "js", "java", "go"];
const DOC_GLOBS: &[&str] = &["*.md", "*.rst", "*.txt", "**/docs/**", "**/README*", "**/CHANGELOG*"];

macro_rules! history_pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($re).ok());
    };
}

history_pattern!(RE_FEATURE, r"(?i)\b(feat|feature|add|implement|new)\b");
history_pattern!(RE_FIX, r"(?i)\b(fix|bug|patch|resolve|solved)\b");
history_pattern!(RE_DOCS, r"(?i)\b(doc|docs|documentation|readme)\b");
history_pattern!(RE_REFACTOR, r"(?i)\b(refactor|restructure|reorganize|cleanup)\b");
history_pattern!(RE_TESTS, r"(?i)\b(test|tests|testing|spec)\b");
history_pattern!(RE_BREAKING, r"(?i)(\b(breaking|break|incompatible|major)\b|!:)");
history_pattern!(RE_FEATURE_COMMIT, r"(?i)feat|feature|add|implement");
history_pattern!(
    RE_SEMVER,
    r"^v?\d+\.\d+\.\d+(-[a-zA-Z0-9.-]+)?(\+[a-zA-Z0-9.-]+)?$"
);

static DOC_SET: LazyLock<Option<GlobSet>> = LazyLock::new(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in DOC_GLOBS {
        builder.add(Glob::new(pattern).ok()?);
    }
    builder.build().ok()
});

fn matches(pattern: &'static LazyLock<Option<Regex>>, text: &str) -> bool {
    LazyLock::force(pattern)
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// One commit as seen from HEAD's history.
#[derive(Debug, Clone, Default)]
pub struct CommitRecord {
    pub sha: String,
    /// Seconds since the epoch, author time.
    pub time: i64,
    pub author: String,
    pub summary: String,
    pub is_merge: bool,
    /// Paths touched relative to the first parent. Empty for merges.
    pub changed: Vec<String>,
    pub added: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TagRecord {
    pub name: String,
    pub sha: String,
    pub time: i64,
    pub summary: String,
}

/// Everything read from the repository, newest commit first.
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    pub branch: Option<String>,
    pub remote_url: Option<String>,
    pub head_sha: Option<String>,
    pub commits: Vec<CommitRecord>,
    pub tracked_files: Vec<String>,
    pub tags: Vec<TagRecord>,
    pub now: i64,
}

impl HistorySnapshot {
    fn since(&self, days: i64) -> impl Iterator<Item = &CommitRecord> {
        let cutoff = self.now - days * SECS_PER_DAY;
        self.commits
            .iter()
            .filter(move |c| !c.is_merge && c.time >= cutoff)
    }

    fn days_ago(&self, time: i64) -> i64 {
        (self.now - time) / SECS_PER_DAY
    }
}

pub fn iso_date(time: i64) -> String {
    DateTime::from_timestamp(time, 0)
        .map(|d| d.to_rfc3339())
        .unwrap_or_default()
}

pub fn month_key(time: i64) -> String {
    DateTime::from_timestamp(time, 0)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| extensions.contains(&ext))
}

fn ranked(counts: FxHashMap<&str, usize>) -> Vec<FileChanges> {
    let mut ranked: Vec<FileChanges> = counts
        .into_iter()
        .map(|(file, changes)| FileChanges {
            file: file.to_string(),
            changes,
        })
        .collect();
    ranked.sort_by(|a, b| b.changes.cmp(&a.changes).then_with(|| a.file.cmp(&b.file)));
    ranked
}

/// The last time each path was touched by a non-merge commit.
fn last_touched(snapshot: &HistorySnapshot) -> FxHashMap<&str, i64> {
    let mut last: FxHashMap<&str, i64> = FxHashMap::default();
    for commit in snapshot.commits.iter().filter(|c| !c.is_merge) {
        for path in &commit.changed {
            let entry = last.entry(path.as_str()).or_insert(commit.time);
            *entry = (*entry).max(commit.time);
        }
    }
    last
}

pub fn repository_info(snapshot: &HistorySnapshot) -> RepositoryInfo {
    let first = snapshot.commits.iter().map(|c| c.time).min();
    let last = snapshot.commits.iter().map(|c| c.time).max();
    RepositoryInfo {
        current_branch: snapshot.branch.clone(),
        remote_url: snapshot.remote_url.clone(),
        last_commit: snapshot.head_sha.clone(),
        total_commits: snapshot.commits.len(),
        repo_age_days: match (first, last) {
            (Some(f), Some(l)) => (l - f) / SECS_PER_DAY,
            _ => 0,
        },
        first_commit_date: first.map(iso_date),
        last_commit_date: last.map(iso_date),
    }
}

pub fn commit_patterns<'a>(summaries: impl IntoIterator<Item = &'a str>) -> CommitPatterns {
    let mut patterns = CommitPatterns::default();
    for msg in summaries {
        patterns.features += usize::from(matches(&RE_FEATURE, msg));
        patterns.fixes += usize::from(matches(&RE_FIX, msg));
        patterns.documentation += usize::from(matches(&RE_DOCS, msg));
        patterns.refactoring += usize::from(matches(&RE_REFACTOR, msg));
        patterns.tests += usize::from(matches(&RE_TESTS, msg));
        patterns.breaking_changes += usize::from(matches(&RE_BREAKING, msg));
    }
    patterns
}

pub fn commit_history(snapshot: &HistorySnapshot) -> CommitHistory {
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_author: BTreeMap<String, usize> = BTreeMap::new();
    let mut summaries = Vec::new();
    for commit in snapshot.since(HISTORY_WINDOW_DAYS) {
        *by_month.entry(month_key(commit.time)).or_default() += 1;
        *by_author.entry(commit.author.clone()).or_default() += 1;
        summaries.push(commit.summary.as_str());
    }
    let average = if by_month.is_empty() {
        0.0
    } else {
        by_month.values().sum::<usize>() as f64 / by_month.len() as f64
    };
    CommitHistory {
        commit_patterns: commit_patterns(summaries),
        commits_by_month: by_month,
        commits_by_author: by_author,
        average_commits_per_month: average,
    }
}

pub fn file_history(snapshot: &HistorySnapshot) -> FileHistory {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for commit in snapshot.since(HISTORY_WINDOW_DAYS) {
        for path in &commit.changed {
            *counts.entry(path.as_str()).or_default() += 1;
        }
    }
    let total_files_changed = counts.len();
    let mut most_changed = ranked(counts);
    most_changed.truncate(20);

    let recently_added_files = snapshot
        .since(RECENTLY_ADDED_DAYS)
        .flat_map(|c| {
            c.added.iter().map(move |file| AddedFile {
                file: file.clone(),
                added_at: iso_date(c.time),
            })
        })
        .take(10)
        .collect();

    FileHistory {
        most_changed_files: most_changed,
        recently_added_files,
        total_files_changed,
    }
}

pub fn is_documentation(path: &str) -> bool {
    LazyLock::force(&DOC_SET)
        .as_ref()
        .is_some_and(|set| set.is_match(path))
}

pub fn documentation_sync(snapshot: &HistorySnapshot) -> DocumentationSync {
    let touched = last_touched(snapshot);
    let docs: Vec<&str> = snapshot
        .tracked_files
        .iter()
        .map(String::as_str)
        .filter(|p| is_documentation(p))
        .collect();

    let mut updates: Vec<(&str, i64)> = docs
        .iter()
        .filter_map(|d| touched.get(d).map(|t| (*d, *t)))
        .collect();
    updates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let readme = updates
        .iter()
        .filter(|(f, _)| f.to_lowercase().contains("readme"))
        .max_by_key(|(_, t)| *t);
    let readme_days = readme.map(|(_, t)| snapshot.days_ago(*t));

    let recent_code_changes = snapshot
        .since(CHURN_WINDOW_DAYS)
        .flat_map(|c| c.changed.iter())
        .filter(|p| has_extension(p, CODE_EXTENSIONS))
        .count();

    let mut outdated = Vec::new();
    if let (Some((file, _)), Some(days)) = (readme, readme_days) {
        if days > README_STALE_DAYS && recent_code_changes > CODE_CHURN_THRESHOLD {
            outdated.push(OutdatedDoc {
                file: (*file).to_string(),
                days_since_update: days,
                recommendation: "README may be outdated given recent code changes".to_string(),
            });
        }
    }

    DocumentationSync {
        documentation_files: docs.len(),
        last_doc_updates: updates
            .iter()
            .take(10)
            .map(|(f, t)| DocUpdate {
                file: (*f).to_string(),
                updated_at: iso_date(*t),
            })
            .collect(),
        readme_days_since_update: readme_days,
        recent_code_changes,
        potentially_outdated_docs: outdated,
    }
}

pub fn contributor_analysis(snapshot: &HistorySnapshot, with_ownership: bool) -> ContributorAnalysis {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for commit in snapshot.since(HISTORY_WINDOW_DAYS) {
        *counts.entry(commit.author.as_str()).or_default() += 1;
    }
    let mut contributors: Vec<Contributor> = counts
        .into_iter()
        .map(|(name, commits)| Contributor {
            name: name.to_string(),
            commits,
        })
        .collect();
    contributors.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.name.cmp(&b.name)));

    let total: usize = contributors.iter().map(|c| c.commits).sum();
    let bus_factor = if total == 0 {
        0
    } else {
        contributors
            .iter()
            .filter(|c| c.commits as f64 / total as f64 > BUS_FACTOR_SHARE)
            .count()
    };
    let total_contributors = contributors.len();
    let file_ownership = if with_ownership {
        file_ownership(snapshot)
    } else {
        Vec::new()
    };
    contributors.truncate(20);

    ContributorAnalysis {
        contributors,
        total_contributors,
        bus_factor,
        file_ownership,
    }
}

/// Top author of each of the ten most-changed files.
fn file_ownership(snapshot: &HistorySnapshot) -> Vec<FileOwner> {
    let mut per_file: FxHashMap<&str, FxHashMap<&str, usize>> = FxHashMap::default();
    for commit in snapshot.commits.iter().filter(|c| !c.is_merge) {
        for path in &commit.changed {
            *per_file
                .entry(path.as_str())
                .or_default()
                .entry(commit.author.as_str())
                .or_default() += 1;
        }
    }
    let totals: FxHashMap<&str, usize> = per_file
        .iter()
        .map(|(f, authors)| (*f, authors.values().sum()))
        .collect();
    ranked(totals)
        .into_iter()
        .take(10)
        .filter_map(|fc| {
            let authors = per_file.get(fc.file.as_str())?;
            let (name, commits) = authors
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))?;
            Some(FileOwner {
                file: fc.file.clone(),
                primary_maintainer: (*name).to_string(),
                commits: *commits,
            })
        })
        .collect()
}

pub fn stability_analysis(snapshot: &HistorySnapshot, with_abandoned: bool) -> StabilityAnalysis {
    let mut churn: FxHashMap<&str, usize> = FxHashMap::default();
    for commit in snapshot.since(CHURN_WINDOW_DAYS) {
        for path in commit.changed.iter().filter(|p| !p.starts_with('.')) {
            *churn.entry(path.as_str()).or_default() += 1;
        }
    }
    let high_churn_files: Vec<FileChanges> = ranked(churn)
        .into_iter()
        .filter(|f| f.changes > HIGH_CHURN_CHANGES)
        .take(10)
        .collect();

    let mut abandoned = Vec::new();
    if with_abandoned {
        let touched = last_touched(snapshot);
        for file in snapshot
            .tracked_files
            .iter()
            .filter(|f| has_extension(f, ABANDONED_EXTENSIONS))
            .take(ABANDONED_CANDIDATES)
        {
            if let Some(t) = touched.get(file.as_str()) {
                let days = snapshot.days_ago(*t);
                if days > ABANDONED_DAYS {
                    abandoned.push(StaleFile {
                        file: file.clone(),
                        days_since_change: days,
                    });
                }
            }
        }
        abandoned.sort_by(|a, b| {
            b.days_since_change
                .cmp(&a.days_since_change)
                .then_with(|| a.file.cmp(&b.file))
        });
        abandoned.truncate(10);
    }

    StabilityAnalysis {
        high_churn_files,
        potentially_abandoned_files: abandoned,
    }
}

pub fn feature_timeline(snapshot: &HistorySnapshot) -> FeatureTimeline {
    let features: Vec<&CommitRecord> = snapshot
        .since(HISTORY_WINDOW_DAYS)
        .filter(|c| matches(&RE_FEATURE_COMMIT, &c.summary))
        .take(50)
        .collect();
    let mut per_month: BTreeMap<String, usize> = BTreeMap::new();
    for commit in &features {
        *per_month.entry(month_key(commit.time)).or_default() += 1;
    }
    FeatureTimeline {
        recent_features: features
            .iter()
            .take(20)
            .map(|c| FeatureCommit {
                date: iso_date(c.time),
                feature: c.summary.clone(),
            })
            .collect(),
        features_per_month: per_month,
    }
}

/// Numeric components of a tag, for newest-first ordering.
fn version_key(tag: &str) -> Vec<u64> {
    tag.split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

pub fn is_semver(tag: &str) -> bool {
    matches(&RE_SEMVER, tag)
}

pub fn version_analysis(snapshot: &HistorySnapshot) -> VersionAnalysis {
    if snapshot.tags.is_empty() {
        return VersionAnalysis::default();
    }
    let mut tags: Vec<&TagRecord> = snapshot.tags.iter().collect();
    tags.sort_by(|a, b| {
        version_key(&b.name)
            .cmp(&version_key(&a.name))
            .then_with(|| b.name.cmp(&a.name))
    });
    let compliant = tags.iter().filter(|t| is_semver(&t.name)).count();
    VersionAnalysis {
        has_versions: true,
        total_versions: tags.len(),
        latest_version: tags.first().map(|t| t.name.clone()),
        versions: tags
            .iter()
            .take(10)
            .map(|t| VersionDetail {
                version: t.name.clone(),
                sha: t.sha.clone(),
                date: iso_date(t.time),
                message: t.summary.clone(),
            })
            .collect(),
        follows_semver: compliant as f64 / tags.len() as f64 > SEMVER_COMPLIANCE,
    }
}

pub fn insights(analysis: &GitAnalysis) -> Vec<String> {
    let mut out = Vec::new();
    if analysis.repository_info.repo_age_days < YOUNG_REPO_DAYS {
        out.push("This is a young repository (< 90 days old). Features may be unstable.".to_string());
    }
    let patterns = &analysis.commit_history.commit_patterns;
    if patterns.fixes > patterns.features * 2 {
        out.push("High ratio of bug fixes to features may indicate quality issues.".to_string());
    }
    if patterns.breaking_changes > 5 {
        out.push("Multiple breaking changes detected. API may be unstable.".to_string());
    }
    if !analysis.documentation_sync.potentially_outdated_docs.is_empty() {
        out.push("Some documentation appears outdated compared to recent code changes.".to_string());
    }
    let bus_factor = analysis.contributor_analysis.bus_factor;
    if bus_factor < 3 {
        out.push(format!(
            "Low bus factor ({bus_factor}). Project depends heavily on few contributors."
        ));
    }
    if analysis.stability_analysis.high_churn_files.len() > 5 {
        out.push(
            "Several files have high change frequency, indicating potential instability."
                .to_string(),
        );
    }
    out
}

pub fn verification_issues(analysis: &GitAnalysis) -> Vec<GitVerificationIssue> {
    let mut issues = Vec::new();
    let patterns = &analysis.commit_history.commit_patterns;
    if !analysis.commit_history.commits_by_month.is_empty()
        && patterns.features as f64 / patterns.tests.max(1) as f64 > 3.0
    {
        issues.push(GitVerificationIssue {
            severity: IssueSeverity::Medium,
            kind: "missing_tests".to_string(),
            description: "Many features added without corresponding tests".to_string(),
            evidence: format!(
                "Feature commits: {}, Test commits: {}",
                patterns.features, patterns.tests
            ),
        });
    }
    if !analysis.feature_timeline.recent_features.is_empty()
        && !analysis.documentation_sync.potentially_outdated_docs.is_empty()
    {
        issues.push(GitVerificationIssue {
            severity: IssueSeverity::Medium,
            kind: "outdated_documentation".to_string(),
            description: "Recent features may not be properly documented".to_string(),
            evidence: "Documentation hasn't been updated recently despite new features".to_string(),
        });
    }
    let versions = &analysis.version_analysis;
    if versions.has_versions && !versions.follows_semver {
        issues.push(GitVerificationIssue {
            severity: IssueSeverity::Low,
            kind: "versioning_inconsistency".to_string(),
            description: "Version tags don't follow semantic versioning".to_string(),
            evidence: "Inconsistent version tag format detected".to_string(),
        });
    }
    issues
}

/// Full analysis of a snapshot. `quick` skips abandoned-file and
/// ownership scans.
pub fn analyze_snapshot(snapshot: &HistorySnapshot, quick: bool) -> GitAnalysis {
    let mut analysis = GitAnalysis {
        is_git_repo: true,
        repository_info: repository_info(snapshot),
        commit_history: commit_history(snapshot),
        file_history: file_history(snapshot),
        documentation_sync: documentation_sync(snapshot),
        contributor_analysis: contributor_analysis(snapshot, !quick),
        stability_analysis: stability_analysis(snapshot, !quick),
        feature_timeline: feature_timeline(snapshot),
        version_analysis: version_analysis(snapshot),
        ..GitAnalysis::default()
    };
    analysis.insights = insights(&analysis);
    analysis.verification_issues = verification_issues(&analysis);
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_760_000_000;

    fn commit(days_ago: i64, author: &str, summary: &str, changed: &[&str]) -> CommitRecord {
        CommitRecord {
            sha: format!("{days_ago:040}"),
            time: NOW - days_ago * SECS_PER_DAY,
            author: author.to_string(),
            summary: summary.to_string(),
            is_merge: false,
            changed: changed.iter().map(|s| s.to_string()).collect(),
            added: Vec::new(),
        }
    }

    fn snapshot(commits: Vec<CommitRecord>) -> HistorySnapshot {
        HistorySnapshot {
            commits,
            now: NOW,
            ..HistorySnapshot::default()
        }
    }

    #[test]
    fn patterns_are_word_based_and_catch_bang_colon() {
        let p = commit_patterns(["feat!: new parser", "fix bug in cache", "addition of tests", "docs: readme"]);
        assert_eq!(p.features, 1);
        assert_eq!(p.fixes, 1);
        assert_eq!(p.tests, 1);
        assert_eq!(p.documentation, 1);
        assert_eq!(p.breaking_changes, 1);
    }

    #[test]
    fn history_excludes_merges_and_old_commits() {
        let mut merge = commit(1, "ann", "Merge branch x", &[]);
        merge.is_merge = true;
        let snap = snapshot(vec![
            merge,
            commit(2, "ann", "add x", &["a.py"]),
            commit(40, "bob", "fix y", &["a.py"]),
            commit(400, "bob", "old", &["b.py"]),
        ]);
        let history = commit_history(&snap);
        assert_eq!(history.commits_by_author.values().sum::<usize>(), 2);
        assert_eq!(history.commits_by_author["bob"], 1);
        let info = repository_info(&snap);
        assert_eq!(info.total_commits, 4);
        assert_eq!(info.repo_age_days, 399);
    }

    #[test]
    fn bus_factor_counts_authors_above_ten_percent() {
        let mut commits: Vec<_> = (0..18).map(|d| commit(d, "ann", "work", &[])).collect();
        commits.push(commit(20, "bob", "work", &[]));
        commits.push(commit(21, "cy", "work", &[]));
        let analysis = contributor_analysis(&snapshot(commits), false);
        assert_eq!(analysis.total_contributors, 3);
        assert_eq!(analysis.bus_factor, 1);
        assert_eq!(analysis.contributors[0].name, "ann");
    }

    #[test]
    fn stale_readme_with_code_churn_is_outdated() {
        let mut commits = vec![commit(60, "ann", "docs", &["README.md"])];
        for d in 0..11 {
            commits.push(commit(d, "ann", "change", &["src/lib.py"]));
        }
        let mut snap = snapshot(commits);
        snap.tracked_files = vec!["README.md".into(), "src/lib.py".into()];
        let sync = documentation_sync(&snap);
        assert_eq!(sync.documentation_files, 1);
        assert_eq!(sync.readme_days_since_update, Some(60));
        assert_eq!(sync.potentially_outdated_docs.len(), 1);

        let stability = stability_analysis(&snap, false);
        assert_eq!(stability.high_churn_files[0].file, "src/lib.py");
        assert_eq!(stability.high_churn_files[0].changes, 11);
    }

    #[test]
    fn abandoned_files_need_a_year_without_changes() {
        let mut snap = snapshot(vec![
            commit(500, "ann", "init", &["old.py", "fresh.py"]),
            commit(3, "ann", "tweak", &["fresh.py"]),
        ]);
        snap.tracked_files = vec!["old.py".into(), "fresh.py".into()];
        let stability = stability_analysis(&snap, true);
        assert_eq!(stability.potentially_abandoned_files.len(), 1);
        assert_eq!(stability.potentially_abandoned_files[0].file, "old.py");
        assert!(stability_analysis(&snap, false).potentially_abandoned_files.is_empty());
    }

    #[test]
    fn versions_sort_numerically_and_check_semver() {
        let mut snap = snapshot(Vec::new());
        snap.tags = ["v1.2.0", "v1.10.0", "v1.9.3", "release-a"]
            .iter()
            .map(|n| TagRecord {
                name: n.to_string(),
                ..TagRecord::default()
            })
            .collect();
        let versions = version_analysis(&snap);
        assert_eq!(versions.latest_version.as_deref(), Some("v1.10.0"));
        assert!(!versions.follows_semver);
        assert!(is_semver("2.0.0-rc.1+build.5"));
    }

    #[test]
    fn issues_flag_features_without_tests_and_bad_tags() {
        let commits = (0..4).map(|d| commit(d, "ann", "add feature", &[])).collect();
        let mut snap = snapshot(commits);
        snap.tags = vec![TagRecord {
            name: "latest".into(),
            ..TagRecord::default()
        }];
        let analysis = analyze_snapshot(&snap, true);
        let kinds: Vec<_> = analysis.verification_issues.iter().map(|i| i.kind.as_str()).collect();
        assert_eq!(kinds, vec!["missing_tests", "versioning_inconsistency"]);
        assert!(analysis.insights.iter().any(|i| i.contains("young repository")));
        assert!(analysis.insights.iter().any(|i| i.contains("Low bus factor (1)")));
    }
}
