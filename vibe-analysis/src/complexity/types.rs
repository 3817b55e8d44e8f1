//! Complexity result types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tools::ToolStatus;

/// Cyclomatic complexity grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rank {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Rank {
    pub const ALL: [Rank; 6] = [Rank::A, Rank::B, Rank::C, Rank::D, Rank::E, Rank::F];

    pub fn from_score(score: u32) -> Self {
        match score {
            0..=5 => Self::A,
            6..=10 => Self::B,
            11..=20 => Self::C,
            21..=30 => Self::D,
            31..=40 => Self::E,
            _ => Self::F,
        }
    }

    /// Distribution bucket label, e.g. `"C (11-20)"`.
    pub fn bucket(&self) -> &'static str {
        match self {
            Self::A => "A (1-5)",
            Self::B => "B (6-10)",
            Self::C => "C (11-20)",
            Self::D => "D (21-30)",
            Self::E => "E (31-40)",
            Self::F => "F (41+)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionComplexity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub complexity: u32,
    pub rank: Rank,
    pub lineno: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// Per-file metrics. Fields a language's analysis cannot produce stay unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileMetrics {
    pub language: String,
    pub loc: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lloc: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sloc: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blank: Option<usize>,
    pub total_complexity: u32,
    pub average_complexity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainability_index: Option<f64>,
    pub functions: Vec<FunctionComplexity>,
}

/// Aggregate for one language family.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageComplexity {
    pub total_complexity: u32,
    pub total_loc: usize,
    pub total_lloc: usize,
    pub files_analyzed: usize,
    #[serde(skip)]
    pub complexity_scores: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_status: Option<ToolStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplexitySummary {
    pub total_files: usize,
    pub total_complexity: u32,
    /// Total complexity divided by analyzed files.
    pub average_complexity: f64,
    pub total_loc: usize,
    pub total_lloc: usize,
    pub complexity_distribution: BTreeMap<String, usize>,
    pub languages_analyzed: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComplexityResults {
    pub files: BTreeMap<String, FileMetrics>,
    pub by_language: BTreeMap<String, LanguageComplexity>,
    pub summary: ComplexitySummary,
}

impl ComplexityResults {
    /// Functions with complexity above `threshold`, with their file.
    pub fn functions_above(&self, threshold: u32) -> impl Iterator<Item = (&str, &FunctionComplexity)> {
        self.files.iter().flat_map(move |(path, metrics)| {
            metrics
                .functions
                .iter()
                .filter(move |f| f.complexity > threshold)
                .map(move |f| (path.as_str(), f))
        })
    }

    /// Count of functions in the given ranks.
    pub fn functions_ranked(&self, ranks: &[Rank]) -> usize {
        self.files
            .values()
            .flat_map(|m| m.functions.iter())
            .filter(|f| ranks.contains(&f.rank))
            .count()
    }
}

/// Count scores per rank bucket; every bucket is present.
pub fn distribution(scores: &[u32]) -> BTreeMap<String, usize> {
    let mut dist: BTreeMap<String, usize> =
        Rank::ALL.iter().map(|r| (r.bucket().to_string(), 0)).collect();
    for &score in scores {
        *dist.entry(Rank::from_score(score).bucket().to_string()).or_default() += 1;
    }
    dist
}
