//! Formal verification result types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tools::ToolReport;

/// Frama-C WP goal statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WpStats {
    pub proved: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Counterexample {
    pub description: String,
    pub inputs: Vec<String>,
}

/// What a formal tool reported. Only the fields the tool produces are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormalFinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ub_detected: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wp: Option<WpStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub counterexamples: Vec<Counterexample>,
    /// Raw JSON report for tools whose output is passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<serde_json::Value>,
    /// Tail of the tool's output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

pub type FormalReport = ToolReport<FormalFinding>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FormalResults {
    /// Tool name → found on this machine.
    pub available_tools: BTreeMap<String, bool>,
    /// Language group → check key (`tool` or `tool:file`) → report.
    pub contracts: BTreeMap<String, BTreeMap<String, FormalReport>>,
}

impl FormalResults {
    pub fn checks_performed(&self) -> usize {
        self.contracts.values().map(BTreeMap::len).sum()
    }

    pub fn languages_checked(&self) -> Vec<&str> {
        self.contracts
            .iter()
            .filter(|(_, checks)| !checks.is_empty())
            .map(|(lang, _)| lang.as_str())
            .collect()
    }
}
