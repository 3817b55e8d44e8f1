//! Documentation analysis: discover docs, extract claims, correlate them
//! with code, and plan how each could be verified.

use std::collections::BTreeMap;
use std::path::Path;

use rayon::prelude::*;
use vibe_core::config::DocsConfig;
use vibe_core::errors::ScanError;

use super::code_index::CodeIndex;
use super::discovery::find_documentation_files;
use super::extractor::{extract_docstrings, extract_markdown, extract_plain, extract_rst};
use super::patterns::{compiled, RE_LONG_WORD, RE_WORD};
use super::references::find_code_references;
use super::types::{
    Claim, ClaimType, DocsRecommendation, DocsSummary, DocumentationResults, VerificationMethod,
};
use crate::parsers::PythonParser;
use crate::scanner::{Language, RepoInventory};

const FEATURE_STOPWORDS: &[&str] = &["that", "this", "with", "from", "have"];
const MAX_FEATURE_KEYWORDS: usize = 3;
const MAX_EXAMPLES: usize = 3;

pub struct DocumentationAnalyzer<'a> {
    inventory: &'a RepoInventory,
    config: &'a DocsConfig,
}

impl<'a> DocumentationAnalyzer<'a> {
    pub fn new(inventory: &'a RepoInventory, config: &'a DocsConfig) -> Self {
        Self { inventory, config }
    }

    pub fn analyze(&self) -> Result<DocumentationResults, ScanError> {
        let doc_files = find_documentation_files(self.inventory)?;

        let mut claims: Vec<Claim> = doc_files
            .par_iter()
            .flat_map_iter(|rel| self.claims_from_file(rel))
            .collect();
        if self.config.effective_inline_docs() {
            claims.extend(self.inline_claims());
        }

        let mut code_references = BTreeMap::new();
        for rel in &doc_files {
            let Some(content) = self.inventory.read(rel) else {
                continue;
            };
            let refs = find_code_references(&content);
            if !refs.is_empty() {
                code_references.insert(rel.display().to_string(), refs);
            }
        }

        let index = CodeIndex::build(self.inventory);
        for claim in &mut claims {
            correlate(claim, &index);
            claim.verifiable = match claim.claim_type {
                ClaimType::Feature | ClaimType::Behavior => !claim.related_code.is_empty(),
                _ => true,
            };
        }

        let threshold = self.config.effective_high_confidence_threshold();
        let summary = summarize(&claims, doc_files.len(), &code_references, threshold);
        tracing::info!(
            claims = summary.total_claims,
            verifiable = summary.verifiable_claims,
            files = summary.documentation_files,
            "documentation analyzed"
        );

        Ok(DocumentationResults {
            verification_recommendations: recommendations(&claims),
            summary,
            claims,
            documentation_files: doc_files.iter().map(|p| p.display().to_string()).collect(),
            code_references,
        })
    }

    fn claims_from_file(&self, rel: &Path) -> Vec<Claim> {
        let Some(content) = self.inventory.read(rel) else {
            tracing::debug!(path = %rel.display(), "skipping unreadable doc file");
            return Vec::new();
        };
        let source = rel.display().to_string();
        match rel.extension().and_then(|e| e.to_str()) {
            Some("md") => extract_markdown(&content, &source),
            Some("rst") => extract_rst(&content, &source),
            _ => extract_plain(&content, &source),
        }
    }

    fn inline_claims(&self) -> Vec<Claim> {
        self.inventory
            .files_of(Language::Python)
            .par_iter()
            .map_init(
                || {
                    PythonParser::new()
                        .map_err(|e| tracing::warn!(error = %e, "python grammar unavailable"))
                        .ok()
                },
                |parser, rel| {
                    let (Some(parser), Some(content)) = (parser.as_mut(), self.inventory.read(rel))
                    else {
                        return Vec::new();
                    };
                    match parser.analyze(&content, rel) {
                        Ok(module) if module.syntax_error.is_none() => {
                            extract_docstrings(&module, &rel.display().to_string())
                        }
                        _ => Vec::new(),
                    }
                },
            )
            .flatten()
            .collect()
    }
}

/// Attach related code files to a claim according to its type.
pub fn correlate(claim: &mut Claim, index: &CodeIndex) {
    match claim.claim_type {
        ClaimType::Api => {
            let Some(re) = compiled(&RE_WORD) else { return };
            let words: Vec<String> = re.captures_iter(&claim.text).map(|c| c[1].to_string()).collect();
            for word in words {
                for file in index.files_defining(&word) {
                    claim.add_related(file);
                }
            }
        }
        ClaimType::Feature => {
            let Some(re) = compiled(&RE_LONG_WORD) else { return };
            let keywords: Vec<String> = re
                .captures_iter(&claim.text)
                .map(|c| c[1].to_lowercase())
                .filter(|w| !FEATURE_STOPWORDS.contains(&w.as_str()))
                .take(MAX_FEATURE_KEYWORDS)
                .collect();
            for keyword in keywords {
                if let Some(file) = index.first_file_containing(&keyword) {
                    claim.add_related(file);
                }
            }
        }
        ClaimType::Security => {
            for file in index.security_matches(&claim.text) {
                claim.add_related(file);
            }
        }
        ClaimType::Performance | ClaimType::Behavior => {}
    }
}

fn summarize(
    claims: &[Claim],
    documentation_files: usize,
    code_references: &BTreeMap<String, Vec<String>>,
    threshold: f64,
) -> DocsSummary {
    let total_claims = claims.len();
    let verifiable_claims = claims.iter().filter(|c| c.verifiable).count();
    DocsSummary {
        total_claims,
        verifiable_claims,
        verification_rate: if total_claims > 0 {
            verifiable_claims as f64 / total_claims as f64 * 100.0
        } else {
            0.0
        },
        high_confidence_claims: claims.iter().filter(|c| c.confidence >= threshold).count(),
        documentation_files,
        code_references_found: code_references.values().map(Vec::len).sum(),
    }
}

fn examples<'c>(claims: impl Iterator<Item = &'c Claim>) -> Vec<String> {
    claims.take(MAX_EXAMPLES).map(|c| c.text.clone()).collect()
}

/// One recommendation per verification method in use, plus a review item
/// for claims that cannot be checked automatically.
pub fn recommendations(claims: &[Claim]) -> Vec<DocsRecommendation> {
    let plans = [
        (
            VerificationMethod::UnitTest,
            "unit_testing",
            "high",
            "Write unit tests for {n} API claims",
            "Create test cases that verify each function/method exists and behaves as documented",
        ),
        (
            VerificationMethod::Benchmark,
            "performance_testing",
            "medium",
            "Create benchmarks for {n} performance claims",
            "Implement performance tests to measure and verify performance claims",
        ),
        (
            VerificationMethod::SecurityTest,
            "security_testing",
            "high",
            "Verify {n} security claims",
            "Create security test cases and use security analysis tools",
        ),
        (
            VerificationMethod::IntegrationTest,
            "integration_testing",
            "medium",
            "Create integration tests for {n} feature claims",
            "Write end-to-end tests that verify feature functionality",
        ),
    ];

    let mut out = Vec::new();
    for (method, kind, priority, description, approach) in plans {
        let group: Vec<&Claim> = claims
            .iter()
            .filter(|c| c.verifiable && c.verification_method == method)
            .collect();
        if group.is_empty() {
            continue;
        }
        out.push(DocsRecommendation {
            kind: kind.to_string(),
            priority: priority.to_string(),
            description: description.replace("{n}", &group.len().to_string()),
            examples: examples(group.into_iter()),
            suggested_approach: approach.to_string(),
        });
    }

    let unverifiable: Vec<&Claim> = claims.iter().filter(|c| !c.verifiable).collect();
    if !unverifiable.is_empty() {
        out.push(DocsRecommendation {
            kind: "documentation_review".to_string(),
            priority: "low".to_string(),
            description: format!(
                "Review {} claims that couldn't be automatically verified",
                unverifiable.len()
            ),
            examples: examples(unverifiable.into_iter()),
            suggested_approach:
                "Manually review these claims and update documentation or add verification methods"
                    .to_string(),
        });
    }
    out
}
