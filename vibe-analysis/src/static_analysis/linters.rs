//! Linters and type checkers: pylint, mypy, eslint, tsc.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::types::{EslintData, LintMessage, MypyData, PylintData, TscData, TypeIssue};
use crate::parsers::parse_eslint_report;
use crate::tools::{ToolContext, ToolReport};

static RE_MYPY_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(.+?):(\d+):(?:\d+:)?\s*(error|warning|note):\s*(.*)$").ok()
});
static RE_TSC_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\S.*\(\d+,\d+\):\s").ok());

#[derive(Debug, Deserialize)]
struct PylintMessage {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    path: String,
    line: Option<u32>,
    column: Option<u32>,
    #[serde(default)]
    message: String,
    symbol: Option<String>,
}

pub fn parse_pylint(stdout: &str) -> Result<PylintData, serde_json::Error> {
    if stdout.trim().is_empty() {
        return Ok(PylintData::default());
    }
    let messages: Vec<PylintMessage> = serde_json::from_str(stdout)?;
    let mut grouped: BTreeMap<String, Vec<LintMessage>> = BTreeMap::new();
    let total_issues = messages.len();
    for msg in messages {
        grouped
            .entry(msg.kind.unwrap_or_else(|| "unknown".to_string()))
            .or_default()
            .push(LintMessage {
                file: msg.path,
                line: msg.line,
                column: msg.column,
                message: msg.message,
                symbol: msg.symbol,
            });
    }
    Ok(PylintData {
        messages: grouped,
        total_issues,
    })
}

pub fn parse_mypy(stdout: &str) -> MypyData {
    let Some(re) = LazyLock::force(&RE_MYPY_LINE).as_ref() else {
        return MypyData::default();
    };
    let issues: Vec<TypeIssue> = stdout
        .lines()
        .filter_map(|line| {
            let caps = re.captures(line)?;
            Some(TypeIssue {
                file: caps[1].to_string(),
                line: caps[2].parse().ok()?,
                severity: caps[3].to_string(),
                message: caps[4].trim().to_string(),
            })
        })
        .collect();
    MypyData {
        total_issues: issues.len(),
        issues,
    }
}

pub fn parse_tsc(stdout: &str) -> TscData {
    let issues: Vec<String> = match LazyLock::force(&RE_TSC_LINE).as_ref() {
        Some(re) => stdout
            .lines()
            .filter(|l| re.is_match(l))
            .map(|l| l.trim().to_string())
            .collect(),
        None => Vec::new(),
    };
    TscData {
        total_issues: issues.len(),
        issues,
    }
}

pub fn run_pylint(root: &Path, tools: &ToolContext<'_>) -> ToolReport<PylintData> {
    let inv = tools
        .command("pylint", root)
        .args(["--output-format=json", "--recursive=y", "."]);
    match tools.invoke(&inv) {
        Ok(out) => match parse_pylint(&out.stdout) {
            Ok(data) => ToolReport::completed(data),
            Err(e) => ToolReport::failed(format!("invalid pylint JSON: {e}")),
        },
        Err(status) => ToolReport::from_status(status),
    }
}

pub fn run_mypy(root: &Path, tools: &ToolContext<'_>) -> ToolReport<MypyData> {
    let inv = tools
        .command("mypy", root)
        .args(["--no-error-summary", "--no-color-output", "."]);
    match tools.invoke(&inv) {
        Ok(out) => ToolReport::completed(parse_mypy(&out.stdout)),
        Err(status) => ToolReport::from_status(status),
    }
}

pub fn run_eslint(root: &Path, tools: &ToolContext<'_>) -> ToolReport<EslintData> {
    let inv = tools.command("eslint", root).args(["--format=json", "."]);
    match tools.invoke(&inv) {
        Ok(out) if out.stdout.trim().is_empty() => ToolReport::completed(EslintData::default()),
        Ok(out) => match parse_eslint_report(&out.stdout) {
            Ok(reports) => ToolReport::completed(EslintData {
                total_issues: reports.iter().map(|r| r.messages.len()).sum(),
                reports,
            }),
            Err(e) => ToolReport::failed(e.to_string()),
        },
        Err(status) => ToolReport::from_status(status),
    }
}

pub fn run_tsc(root: &Path, tools: &ToolContext<'_>) -> ToolReport<TscData> {
    let inv = tools
        .command("tsc", root)
        .args(["--noEmit", "--pretty", "false"]);
    match tools.invoke(&inv) {
        Ok(out) => ToolReport::completed(parse_tsc(&out.stdout)),
        Err(status) => ToolReport::from_status(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pylint_groups_by_type() {
        let out = r#"[
            {"type": "convention", "path": "a.py", "line": 1, "column": 0, "message": "Missing module docstring", "symbol": "missing-module-docstring"},
            {"type": "error", "path": "b.py", "line": 3, "column": 4, "message": "Undefined variable 'x'", "symbol": "undefined-variable"},
            {"type": "convention", "path": "b.py", "line": 9, "column": 0, "message": "Line too long", "symbol": "line-too-long"}
        ]"#;
        let data = parse_pylint(out).unwrap();
        assert_eq!(data.total_issues, 3);
        assert_eq!(data.messages["convention"].len(), 2);
        assert_eq!(data.messages["error"][0].file, "b.py");
        assert!(parse_pylint("").unwrap().messages.is_empty());
        assert!(parse_pylint("not json").is_err());
    }

    #[test]
    fn mypy_lines_with_and_without_columns() {
        let out = "app.py:12: error: Incompatible types in assignment\nlib/x.py:3:5: note: See docs\nSuccess: no issues found\n";
        let data = parse_mypy(out);
        assert_eq!(data.total_issues, 2);
        assert_eq!(data.issues[0].line, 12);
        assert_eq!(data.issues[0].severity, "error");
        assert_eq!(data.issues[1].file, "lib/x.py");
        assert_eq!(data.issues[1].message, "See docs");
    }

    #[test]
    fn tsc_keeps_located_diagnostics() {
        let out = "src/a.ts(3,7): error TS2322: Type 'string' is not assignable.\n  continuation (x)\nFound 1 error.\n";
        let data = parse_tsc(out);
        assert_eq!(data.total_issues, 1);
        assert!(data.issues[0].starts_with("src/a.ts(3,7)"));
    }
}
