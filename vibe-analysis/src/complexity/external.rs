//! Complexity for languages measured by external tools, with line-count
//! fallbacks when the tool is missing or its output is unusable.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::types::{FileMetrics, FunctionComplexity, LanguageComplexity, Rank};
use crate::parsers::parse_eslint_report;
use crate::scanner::{Language, RepoInventory};
use crate::tools::{ToolContext, ToolStatus};

pub const JS_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

static RE_ESLINT_COMPLEXITY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"complexity of (\d+)").ok());

type FileEntries = Vec<(String, FileMetrics)>;

fn non_blank_lines(content: &str) -> usize {
    content.lines().filter(|l| !l.trim().is_empty()).count()
}

fn code_lines(content: &str) -> usize {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("//"))
        .count()
}

/// Line counts only; used when no complexity tool is usable.
fn basic_analysis<'a>(
    inventory: &RepoInventory,
    files: impl Iterator<Item = &'a std::path::PathBuf>,
    language: &str,
    count: fn(&str) -> usize,
    note: &str,
) -> (LanguageComplexity, FileEntries) {
    let mut summary = LanguageComplexity {
        note: Some(note.to_string()),
        ..Default::default()
    };
    let mut entries = Vec::new();
    for rel in files {
        let Some(content) = inventory.read(rel) else {
            continue;
        };
        let loc = count(&content);
        summary.total_loc += loc;
        summary.files_analyzed += 1;
        entries.push((
            rel.display().to_string(),
            FileMetrics {
                language: language.to_string(),
                loc,
                ..Default::default()
            },
        ));
    }
    (summary, entries)
}

fn relative_to(root: &Path, path: &str) -> String {
    let p = Path::new(path);
    let rel = p.strip_prefix(root).unwrap_or(p);
    let rel = rel.strip_prefix("./").unwrap_or(rel);
    rel.display().to_string()
}

/// Parse ESLint JSON produced with the `complexity` rule at threshold 1.
pub fn parse_eslint_complexity(
    stdout: &str,
    inventory: &RepoInventory,
) -> Option<(LanguageComplexity, FileEntries)> {
    let reports = parse_eslint_report(stdout).ok()?;
    let re = LazyLock::force(&RE_ESLINT_COMPLEXITY).as_ref()?;
    let mut summary = LanguageComplexity::default();
    let mut entries = Vec::new();

    for report in reports.iter().filter(|r| !r.messages.is_empty()) {
        let rel = relative_to(inventory.root(), &report.file_path);
        let loc = inventory
            .read(Path::new(&rel))
            .map(|c| c.lines().count())
            .unwrap_or(0);
        let mut metrics = FileMetrics {
            language: "JavaScript/TypeScript".to_string(),
            loc,
            ..Default::default()
        };
        for msg in &report.messages {
            if !msg.rule_id.as_deref().is_some_and(|r| r.contains("complexity")) {
                continue;
            }
            let Some(score) = re
                .captures(&msg.message)
                .and_then(|c| c[1].parse::<u32>().ok())
            else {
                continue;
            };
            metrics.total_complexity += score;
            metrics.functions.push(FunctionComplexity {
                name: function_name(&msg.message),
                kind: "function".to_string(),
                complexity: score,
                rank: Rank::from_score(score),
                lineno: msg.line.unwrap_or(0) as usize,
                class_name: None,
            });
            summary.complexity_scores.push(score);
        }
        if !metrics.functions.is_empty() {
            metrics.average_complexity =
                f64::from(metrics.total_complexity) / metrics.functions.len() as f64;
        }
        summary.total_complexity += metrics.total_complexity;
        summary.total_loc += loc;
        summary.files_analyzed += 1;
        entries.push((rel, metrics));
    }
    Some((summary, entries))
}

/// `Function 'name' has a complexity of 4.` → `name`
fn function_name(message: &str) -> String {
    message
        .split('\'')
        .nth(1)
        .unwrap_or("<anonymous>")
        .to_string()
}

pub fn analyze_javascript(
    inventory: &RepoInventory,
    tools: &ToolContext<'_>,
) -> (LanguageComplexity, FileEntries) {
    let invocation = tools
        .command("eslint", inventory.root())
        .args(["--format", "json", "--no-inline-config", "--rule", "complexity:[warn,1]", "."]);
    let status = match tools.invoke(&invocation) {
        Ok(output) if !output.stdout.trim().is_empty() => {
            if let Some((mut summary, entries)) = parse_eslint_complexity(&output.stdout, inventory) {
                summary.tool_used = Some("eslint".to_string());
                summary.tool_status = Some(ToolStatus::Completed);
                return (summary, entries);
            }
            ToolStatus::Failed {
                error: "unparseable eslint output".to_string(),
            }
        }
        Ok(output) => ToolStatus::Failed {
            error: format!("eslint produced no output (exit {:?})", output.exit_code),
        },
        Err(status) => status,
    };

    let (mut summary, entries) = basic_analysis(
        inventory,
        inventory.with_extensions(JS_EXTENSIONS),
        "JavaScript/TypeScript",
        non_blank_lines,
        "Complexity analysis requires eslint",
    );
    summary.tool_status = Some(status);
    (summary, entries)
}

/// Parse `gocyclo` lines: `<complexity> <package> <function> <file:line:col>`.
pub fn parse_gocyclo(stdout: &str) -> Vec<(String, FunctionComplexity)> {
    stdout
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            let score: u32 = parts[0].parse().ok()?;
            let mut location = parts[parts.len() - 1].split(':');
            let file = location.next()?.to_string();
            let lineno = location.next().and_then(|l| l.parse().ok()).unwrap_or(0);
            Some((
                file,
                FunctionComplexity {
                    name: parts[2].to_string(),
                    kind: "function".to_string(),
                    complexity: score,
                    rank: Rank::from_score(score),
                    lineno,
                    class_name: None,
                },
            ))
        })
        .collect()
}

pub fn analyze_go(
    inventory: &RepoInventory,
    tools: &ToolContext<'_>,
) -> (LanguageComplexity, FileEntries) {
    let invocation = tools
        .command("gocyclo", inventory.root())
        .args(["-top", "1000", "."]);
    let status = match tools.invoke(&invocation) {
        Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
            let functions = parse_gocyclo(&output.stdout);
            if !functions.is_empty() {
                return summarize_gocyclo(inventory, functions);
            }
            ToolStatus::Failed {
                error: "no gocyclo results".to_string(),
            }
        }
        Ok(output) => ToolStatus::Failed {
            error: format!("gocyclo exited with {:?}", output.exit_code),
        },
        Err(status) => status,
    };

    let go_files = inventory
        .files_of(Language::Go)
        .iter()
        .filter(|p| !p.components().any(|c| c.as_os_str() == "vendor"));
    let (mut summary, entries) = basic_analysis(
        inventory,
        go_files,
        "Go",
        code_lines,
        "Complexity analysis requires gocyclo tool",
    );
    summary.tool_status = Some(status);
    (summary, entries)
}

fn summarize_gocyclo(
    inventory: &RepoInventory,
    functions: Vec<(String, FunctionComplexity)>,
) -> (LanguageComplexity, FileEntries) {
    let mut summary = LanguageComplexity {
        tool_used: Some("gocyclo".to_string()),
        tool_status: Some(ToolStatus::Completed),
        ..Default::default()
    };
    let files: BTreeSet<String> = functions
        .iter()
        .map(|(f, _)| relative_to(inventory.root(), f))
        .collect();
    let mut entries = Vec::new();
    for file in files {
        let loc = inventory
            .read(Path::new(&file))
            .map(|c| non_blank_lines(&c))
            .unwrap_or(0);
        let funcs: Vec<FunctionComplexity> = functions
            .iter()
            .filter(|(f, _)| relative_to(inventory.root(), f) == file)
            .map(|(_, func)| func.clone())
            .collect();
        let total: u32 = funcs.iter().map(|f| f.complexity).sum();
        summary.total_complexity += total;
        summary.total_loc += loc;
        summary.files_analyzed += 1;
        summary.complexity_scores.extend(funcs.iter().map(|f| f.complexity));
        entries.push((
            file,
            FileMetrics {
                language: "Go".to_string(),
                loc,
                total_complexity: total,
                average_complexity: f64::from(total) / funcs.len().max(1) as f64,
                functions: funcs,
                ..Default::default()
            },
        ));
    }
    (summary, entries)
}

/// Java has no complexity tool wired in; count code lines.
pub fn analyze_java(inventory: &RepoInventory) -> (LanguageComplexity, FileEntries) {
    basic_analysis(
        inventory,
        inventory.files_of(Language::Java).iter(),
        "Java",
        code_lines,
        "Complexity analysis requires checkstyle or pmd",
    )
}
