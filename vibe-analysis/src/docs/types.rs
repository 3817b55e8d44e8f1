//! Claim and documentation result types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Category of a documentation claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Feature,
    Performance,
    Security,
    Api,
    Behavior,
}

impl ClaimType {
    pub const ALL: [ClaimType; 5] = [
        Self::Feature,
        Self::Performance,
        Self::Security,
        Self::Api,
        Self::Behavior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Api => "api",
            Self::Behavior => "behavior",
        }
    }

    /// How a claim of this type would be checked.
    pub fn verification_method(&self) -> VerificationMethod {
        match self {
            Self::Api => VerificationMethod::UnitTest,
            Self::Performance => VerificationMethod::Benchmark,
            Self::Security => VerificationMethod::SecurityTest,
            Self::Feature => VerificationMethod::IntegrationTest,
            Self::Behavior => VerificationMethod::PropertyTest,
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    UnitTest,
    Benchmark,
    SecurityTest,
    IntegrationTest,
    PropertyTest,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnitTest => "unit_test",
            Self::Benchmark => "benchmark",
            Self::SecurityTest => "security_test",
            Self::IntegrationTest => "integration_test",
            Self::PropertyTest => "property_test",
        }
    }
}

/// A textual assertion extracted from documentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    pub text: String,
    /// Root-relative path of the document or source file.
    pub source_file: String,
    /// 1-based line, or 0 when the position is unknown.
    pub line_number: usize,
    pub claim_type: ClaimType,
    pub confidence: f64,
    /// Section heading, `docstring`, or `code_example_<block>`.
    pub context: String,
    pub verifiable: bool,
    pub verification_method: VerificationMethod,
    pub related_code: Vec<String>,
}

impl Claim {
    pub fn new(
        text: impl Into<String>,
        source_file: impl Into<String>,
        line_number: usize,
        claim_type: ClaimType,
        confidence: f64,
        context: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_file: source_file.into(),
            line_number,
            claim_type,
            confidence,
            context: context.into(),
            verifiable: true,
            verification_method: claim_type.verification_method(),
            related_code: Vec::new(),
        }
    }

    /// Append a related file unless it is already listed.
    pub fn add_related(&mut self, file: &str) {
        if !self.related_code.iter().any(|f| f == file) {
            self.related_code.push(file.to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocsSummary {
    pub total_claims: usize,
    pub verifiable_claims: usize,
    /// Percentage of claims that are verifiable.
    pub verification_rate: f64,
    pub high_confidence_claims: usize,
    pub documentation_files: usize,
    pub code_references_found: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocsRecommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: String,
    pub description: String,
    pub examples: Vec<String>,
    pub suggested_approach: String,
}

/// Output of the documentation phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentationResults {
    pub summary: DocsSummary,
    pub claims: Vec<Claim>,
    pub documentation_files: Vec<String>,
    /// Doc file → inline code references (`func()`, `class X`, `path/file.ext`).
    pub code_references: BTreeMap<String, Vec<String>>,
    pub verification_recommendations: Vec<DocsRecommendation>,
}

impl DocumentationResults {
    pub fn claims_by_type(&self) -> BTreeMap<ClaimType, Vec<&Claim>> {
        let mut grouped: BTreeMap<ClaimType, Vec<&Claim>> = BTreeMap::new();
        for claim in &self.claims {
            grouped.entry(claim.claim_type).or_default().push(claim);
        }
        grouped
    }

    pub fn claims_by_source(&self) -> BTreeMap<&str, Vec<&Claim>> {
        let mut grouped: BTreeMap<&str, Vec<&Claim>> = BTreeMap::new();
        for claim in &self.claims {
            grouped.entry(claim.source_file.as_str()).or_default().push(claim);
        }
        grouped
    }
}
