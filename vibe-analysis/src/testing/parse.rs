//! Test result parsers: structured reports, console output, JUnit XML.

use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use vibe_core::errors::ParseError;

use super::types::{JunitResults, JunitSuite, TestCounts};

macro_rules! result_pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($re).ok());
    };
}

result_pattern!(RE_PYTEST, r"(?i)(\d+) (passed|failed|skipped|errors?)\b");
result_pattern!(RE_JEST_LINE, r"(?im)^Tests:\s+(.*)$");
result_pattern!(RE_JEST_COUNT, r"(\d+) (passed|failed|skipped|todo|total)");
result_pattern!(RE_MOCHA, r"(?i)(\d+) (passing|failing|pending)");
result_pattern!(RE_GO_RESULT, r"(?m)^\s*--- (PASS|FAIL|SKIP):");
result_pattern!(
    RE_CARGO,
    r"test result: \w+\. (\d+) passed; (\d+) failed; (\d+) ignored"
);

fn re(pattern: &'static LazyLock<Option<Regex>>) -> Option<&'static Regex> {
    LazyLock::force(pattern).as_ref()
}

fn as_count(value: &serde_json::Value) -> usize {
    value.as_u64().unwrap_or(0) as usize
}

/// Counts from a framework's structured report file, when it has a shape
/// we know.
pub fn structured_summary(framework: &str, report: &serde_json::Value) -> Option<TestCounts> {
    match framework {
        "pytest" => {
            let summary = report.get("summary")?;
            Some(TestCounts {
                total: as_count(&summary["total"]),
                passed: as_count(&summary["passed"]),
                failed: as_count(&summary["failed"]) + as_count(&summary["error"]),
                skipped: as_count(&summary["skipped"]),
            })
        }
        "jest" | "vitest" => {
            report.get("numTotalTests")?;
            Some(TestCounts {
                total: as_count(&report["numTotalTests"]),
                passed: as_count(&report["numPassedTests"]),
                failed: as_count(&report["numFailedTests"]),
                skipped: as_count(&report["numPendingTests"]),
            })
        }
        _ => None,
    }
}

/// `go test -json` events. Only per-test events (with a `Test` name) count.
pub fn go_test_events(stdout: &str) -> Option<TestCounts> {
    let mut counts = TestCounts::default();
    let mut saw_event = false;
    for line in stdout.lines() {
        let Ok(event) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        saw_event = true;
        if event.get("Test").and_then(|t| t.as_str()).is_none() {
            continue;
        }
        match event.get("Action").and_then(|a| a.as_str()) {
            Some("pass") => counts.passed += 1,
            Some("fail") => counts.failed += 1,
            Some("skip") => counts.skipped += 1,
            _ => {}
        }
    }
    saw_event.then(|| counts.with_derived_total())
}

/// Counts scraped from console output.
pub fn stdout_summary(framework: &str, stdout: &str) -> TestCounts {
    let mut counts = TestCounts::default();
    match framework {
        "pytest" => {
            if let Some(re) = re(&RE_PYTEST) {
                for cap in re.captures_iter(stdout) {
                    let n: usize = cap[1].parse().unwrap_or(0);
                    match cap[2].to_ascii_lowercase().as_str() {
                        "passed" => counts.passed = n,
                        "failed" => counts.failed += n,
                        "skipped" => counts.skipped = n,
                        _ => counts.failed += n,
                    }
                }
            }
        }
        "jest" | "vitest" => {
            let line = re(&RE_JEST_LINE)
                .and_then(|r| r.captures(stdout))
                .map(|c| c[1].to_string())
                .unwrap_or_default();
            if let Some(re) = re(&RE_JEST_COUNT) {
                for cap in re.captures_iter(&line) {
                    let n: usize = cap[1].parse().unwrap_or(0);
                    match &cap[2] {
                        "passed" => counts.passed = n,
                        "failed" => counts.failed = n,
                        "total" => counts.total = n,
                        _ => counts.skipped += n,
                    }
                }
            }
        }
        "mocha" => {
            if let Some(re) = re(&RE_MOCHA) {
                for cap in re.captures_iter(stdout) {
                    let n: usize = cap[1].parse().unwrap_or(0);
                    match cap[2].to_ascii_lowercase().as_str() {
                        "passing" => counts.passed = n,
                        "failing" => counts.failed = n,
                        _ => counts.skipped = n,
                    }
                }
            }
        }
        "gotest" => {
            if let Some(re) = re(&RE_GO_RESULT) {
                for cap in re.captures_iter(stdout) {
                    match &cap[1] {
                        "PASS" => counts.passed += 1,
                        "FAIL" => counts.failed += 1,
                        _ => counts.skipped += 1,
                    }
                }
            }
        }
        "cargo" => {
            if let Some(re) = re(&RE_CARGO) {
                for cap in re.captures_iter(stdout) {
                    counts.passed += cap[1].parse::<usize>().unwrap_or(0);
                    counts.failed += cap[2].parse::<usize>().unwrap_or(0);
                    counts.skipped += cap[3].parse::<usize>().unwrap_or(0);
                }
            }
        }
        _ => {}
    }
    counts.with_derived_total()
}

fn suite_from(element: &BytesStart<'_>) -> JunitSuite {
    let mut suite = JunitSuite {
        name: "Unknown".to_string(),
        ..JunitSuite::default()
    };
    for attr in element.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value);
        match attr.key.as_ref() {
            b"name" => suite.name = value.into_owned(),
            b"tests" => suite.tests = value.parse().unwrap_or(0),
            b"failures" => suite.failures = value.parse().unwrap_or(0),
            b"errors" => suite.errors = value.parse().unwrap_or(0),
            b"skipped" => suite.skipped = value.parse().unwrap_or(0),
            b"time" => suite.time = value.parse().unwrap_or(0.0),
            _ => {}
        }
    }
    suite
}

/// Outermost `<testsuite>` elements, whether the document root is
/// `<testsuites>` or a single suite.
pub fn parse_junit_xml(xml: &str) -> Result<JunitResults, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut results = JunitResults::default();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"testsuite" => {
                if depth == 0 {
                    results.suites.push(suite_from(&e));
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"testsuite" => {
                if depth == 0 {
                    results.suites.push(suite_from(&e));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"testsuite" => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ParseError::MalformedOutput {
                    tool: "junit".to_string(),
                    format: "XML".to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    for suite in &results.suites {
        results.total += suite.tests;
        results.failed += suite.failures;
        results.errors += suite.errors;
        results.skipped += suite.skipped;
        results.time += suite.time;
    }
    results.passed = results
        .total
        .saturating_sub(results.failed + results.errors + results.skipped);
    Ok(results)
}
