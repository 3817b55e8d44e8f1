//! Compiled claim and code-reference patterns.

use std::sync::LazyLock;

use regex::Regex;

use super::types::ClaimType;

macro_rules! doc_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Feature ────────────────────────────────────────────────────────────────
doc_pattern!(
    RE_FEATURE_VERB,
    r"(?i)\b(supports?|provides?|enables?|allows?|implements?|offers?)\s+(.+)"
);
doc_pattern!(RE_FEATURE_MODAL, r"(?i)\b(can|will|does)\s+(.+)");
doc_pattern!(
    RE_FEATURE_LABEL,
    r"(?i)\b(features?|functionality|capability):\s*(.+)"
);

// ── Performance ────────────────────────────────────────────────────────────
doc_pattern!(
    RE_PERF_ADJECTIVE,
    r"(?i)\b(fast|quick|efficient|optimized|performance)\s+(.+)"
);
doc_pattern!(RE_PERF_COMPARISON, r"(?i)\b(\d+x?\s*faster|slower)\s+than\s+(.+)");
doc_pattern!(
    RE_PERF_THROUGHPUT,
    r"(?i)\b(handles?|processes?|supports?)\s+(\d+\s*(?:requests?|operations?|items?))"
);
doc_pattern!(
    RE_PERF_LABEL,
    r"(?i)\b(latency|throughput|response time):\s*(.+)"
);

// ── Security ───────────────────────────────────────────────────────────────
doc_pattern!(
    RE_SECURITY_ADJECTIVE,
    r"(?i)\b(secure|encrypted|authenticated|authorized|protected)\s+(.+)"
);
doc_pattern!(
    RE_SECURITY_ACTION,
    r"(?i)\b(prevents?|blocks?|validates?|sanitizes?)\s+(.+)"
);
doc_pattern!(
    RE_SECURITY_THREAT,
    r"(?i)\b(vulnerability|threat|attack|exploit)\s+(.+)"
);

// ── API ────────────────────────────────────────────────────────────────────
doc_pattern!(
    RE_API_LABEL,
    r"(?i)\b(api|endpoint|method|function|class)\s*:\s*(.+)"
);
doc_pattern!(
    RE_API_CONTRACT,
    r"(?i)\b(returns?|accepts?|expects?|requires?)\s+(.+)"
);
doc_pattern!(
    RE_API_PARAMS,
    r"(?i)\b(parameters?|arguments?|inputs?|outputs?):\s*(.+)"
);

// ── Behavior ───────────────────────────────────────────────────────────────
doc_pattern!(RE_BEHAVIOR_MODAL, r"(?i)\b(always|never|must|should|shall)\s+(.+)");
doc_pattern!(
    RE_BEHAVIOR_GUARANTEE,
    r"(?i)\b(guaranteed|ensures?|maintains?)\s+(.+)"
);
doc_pattern!(
    RE_BEHAVIOR_LABEL,
    r"(?i)\b(defaults?\s+to|behaviors?|actions?):\s*(.+)"
);

// ── Code references ────────────────────────────────────────────────────────
doc_pattern!(RE_REF_FUNCTION, r"`(\w+\.\w+|\w+\(\))`");
doc_pattern!(RE_REF_CLASS, r"`class\s+(\w+)`|`(\w+)\s+class`");
doc_pattern!(RE_REF_FILE, r"`([/\w]+\.\w+)`");

// ── Code examples ──────────────────────────────────────────────────────────
doc_pattern!(RE_CALL, r"(\w+)\s*\([^)]*\)");
doc_pattern!(RE_METHOD_CALL, r"(\w+)\.(\w+)\s*\([^)]*\)");

// ── Code index ─────────────────────────────────────────────────────────────
doc_pattern!(
    RE_DEFINITION,
    r"\b(?:def|class|function|func|fn)\s+([A-Za-z_]\w*)"
);
doc_pattern!(RE_WORD, r"\b(\w+)\b");
doc_pattern!(RE_LONG_WORD, r"\b(\w{4,})\b");
doc_pattern!(RE_DIGIT, r"\d");
doc_pattern!(RE_MARKDOWN_LINK, r"!?\[([^\]]*)\]\([^)]*\)");

static FEATURE: [&LazyLock<Option<Regex>>; 3] = [&RE_FEATURE_VERB, &RE_FEATURE_MODAL, &RE_FEATURE_LABEL];
static PERFORMANCE: [&LazyLock<Option<Regex>>; 4] = [
    &RE_PERF_ADJECTIVE,
    &RE_PERF_COMPARISON,
    &RE_PERF_THROUGHPUT,
    &RE_PERF_LABEL,
];
static SECURITY: [&LazyLock<Option<Regex>>; 3] = [
    &RE_SECURITY_ADJECTIVE,
    &RE_SECURITY_ACTION,
    &RE_SECURITY_THREAT,
];
static API: [&LazyLock<Option<Regex>>; 3] = [&RE_API_LABEL, &RE_API_CONTRACT, &RE_API_PARAMS];
static BEHAVIOR: [&LazyLock<Option<Regex>>; 3] = [
    &RE_BEHAVIOR_MODAL,
    &RE_BEHAVIOR_GUARANTEE,
    &RE_BEHAVIOR_LABEL,
];

/// Claim patterns for one claim type. Capture group 2 is the claim text.
pub fn claim_patterns(claim_type: ClaimType) -> &'static [&'static LazyLock<Option<Regex>>] {
    match claim_type {
        ClaimType::Feature => &FEATURE,
        ClaimType::Performance => &PERFORMANCE,
        ClaimType::Security => &SECURITY,
        ClaimType::Api => &API,
        ClaimType::Behavior => &BEHAVIOR,
    }
}

/// Resolve a lazily compiled pattern.
pub fn compiled(pattern: &'static LazyLock<Option<Regex>>) -> Option<&'static Regex> {
    LazyLock::force(pattern).as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for claim_type in ClaimType::ALL {
            for pattern in claim_patterns(claim_type) {
                assert!(compiled(*pattern).is_some(), "{claim_type} pattern failed to compile");
            }
        }
        for pattern in [&RE_REF_FUNCTION, &RE_REF_CLASS, &RE_REF_FILE, &RE_CALL, &RE_DEFINITION] {
            assert!(compiled(pattern).is_some());
        }
    }

    #[test]
    fn modal_pattern_respects_word_boundaries() {
        let re = compiled(&RE_FEATURE_MODAL).unwrap();
        assert!(re.captures("We scan everything").is_none());
        let caps = re.captures("It can parse TOML").unwrap();
        assert_eq!(&caps[2], "parse TOML");
    }
}
