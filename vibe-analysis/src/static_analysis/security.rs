//! Security scanners: bandit, secret detection, dependency audits.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::types::{BanditData, BanditIssue, DependencyAudit, SecretFinding, SecretsData};
use crate::scanner::RepoInventory;
use crate::tools::{ToolContext, ToolReport};

const MAX_TRUFFLEHOG_DETAILS: usize = 10;

/// Extensions scanned by the built-in secret patterns.
const SECRET_SCAN_EXTENSIONS: &[&str] = &["py", "js", "ts", "java", "env", "config", "conf"];

macro_rules! secret_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

secret_pattern!(
    RE_API_KEY,
    r#"(?i)(api[_-]?key|apikey)\s*[:=]\s*['"]?([a-zA-Z0-9_-]{20,})['"]?"#
);
secret_pattern!(
    RE_PASSWORD,
    r#"(?i)(password|passwd|pwd)\s*[:=]\s*['"]([^'"]+)['"]"#
);
secret_pattern!(
    RE_TOKEN,
    r#"(?i)(token|auth)\s*[:=]\s*['"]?([a-zA-Z0-9_-]{20,})['"]?"#
);
secret_pattern!(
    RE_AWS,
    r#"(?i)(aws[_-]?access[_-]?key[_-]?id|aws[_-]?secret[_-]?access[_-]?key)\s*[:=]\s*['"]?([a-zA-Z0-9/+=]{20,})['"]?"#
);

static SECRET_PATTERNS: [(&str, &LazyLock<Option<Regex>>); 4] = [
    ("api_key", &RE_API_KEY),
    ("password", &RE_PASSWORD),
    ("token", &RE_TOKEN),
    ("aws", &RE_AWS),
];

#[derive(Debug, Deserialize)]
struct BanditOutput {
    #[serde(default)]
    metrics: serde_json::Value,
    #[serde(default)]
    results: Vec<BanditIssue>,
}

pub fn parse_bandit(stdout: &str) -> Result<BanditData, serde_json::Error> {
    if stdout.trim().is_empty() {
        return Ok(BanditData::default());
    }
    let out: BanditOutput = serde_json::from_str(stdout)?;
    Ok(BanditData {
        metrics: out.metrics,
        results: out.results,
    })
}

pub fn run_bandit(root: &Path, tools: &ToolContext<'_>) -> ToolReport<BanditData> {
    let inv = tools.command("bandit", root).args(["-r", "-f", "json", "."]);
    match tools.invoke(&inv) {
        Ok(out) => match parse_bandit(&out.stdout) {
            Ok(data) => ToolReport::completed(data),
            Err(e) => ToolReport::failed(format!("invalid bandit JSON: {e}")),
        },
        Err(status) => ToolReport::from_status(status),
    }
}

/// One JSON object per line; non-JSON log lines are ignored.
pub fn parse_trufflehog(stdout: &str) -> SecretsData {
    let findings: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    let details = findings
        .iter()
        .take(MAX_TRUFFLEHOG_DETAILS)
        .map(|f| SecretFinding {
            file: f
                .pointer("/SourceMetadata/Data/Filesystem/file")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            kind: f
                .get("DetectorName")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string(),
            count: 1,
        })
        .collect();
    SecretsData {
        source: "trufflehog".to_string(),
        found: findings.len(),
        details,
    }
}

fn is_secret_scan_target(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name == ".env"
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SECRET_SCAN_EXTENSIONS.contains(&e))
}

/// Count pattern matches in `content`, one finding per matching pattern.
pub fn scan_text_for_secrets(file: &str, content: &str) -> Vec<SecretFinding> {
    SECRET_PATTERNS
        .iter()
        .filter_map(|(kind, pattern)| {
            let re = LazyLock::force(pattern).as_ref()?;
            let count = re.find_iter(content).count();
            (count > 0).then(|| SecretFinding {
                file: file.to_string(),
                kind: kind.to_string(),
                count,
            })
        })
        .collect()
}

/// Built-in secret scan over source and config files.
pub fn pattern_secret_scan(inventory: &RepoInventory) -> SecretsData {
    let mut details = Vec::new();
    for rel in inventory.files().iter().filter(|p| is_secret_scan_target(p)) {
        if let Some(content) = inventory.read(rel) {
            details.extend(scan_text_for_secrets(&rel.display().to_string(), &content));
        }
    }
    SecretsData {
        source: "pattern_scan".to_string(),
        found: details.len(),
        details,
    }
}

/// trufflehog when available, otherwise the built-in pattern scan.
pub fn check_secrets(inventory: &RepoInventory, tools: &ToolContext<'_>) -> ToolReport<SecretsData> {
    let inv = tools
        .command("trufflehog", inventory.root())
        .args(["filesystem", ".", "--json"]);
    match tools.invoke(&inv) {
        Ok(out) => ToolReport::completed(parse_trufflehog(&out.stdout)),
        Err(status) => {
            tracing::debug!(?status, "trufflehog not usable, falling back to pattern scan");
            ToolReport::completed(pattern_secret_scan(inventory))
        }
    }
}

fn audit(root: &Path, tools: &ToolContext<'_>, program: &str, args: &[&str]) -> ToolReport<DependencyAudit> {
    let inv = tools.command(program, root).args(args.iter().copied());
    match tools.invoke(&inv) {
        Ok(out) => ToolReport::completed(DependencyAudit {
            report: serde_json::from_str(&out.stdout).ok(),
        }),
        Err(status) => ToolReport::from_status(status),
    }
}

/// `safety` for requirements.txt, `npm audit` for package.json.
pub fn check_dependencies(
    root: &Path,
    tools: &ToolContext<'_>,
) -> BTreeMap<String, ToolReport<DependencyAudit>> {
    let mut results = BTreeMap::new();
    if root.join("requirements.txt").exists() {
        results.insert("python".to_string(), audit(root, tools, "safety", &["check", "--json"]));
    }
    if root.join("package.json").exists() {
        results.insert("npm".to_string(), audit(root, tools, "npm", &["audit", "--json"]));
    }
    results
}
