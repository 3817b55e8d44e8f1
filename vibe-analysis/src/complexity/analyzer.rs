//! Complexity phase: per-language analysis merged into one summary.

use super::external::{analyze_go, analyze_java, analyze_javascript};
use super::python::analyze_python;
use super::types::{distribution, ComplexityResults, ComplexitySummary, FileMetrics, LanguageComplexity};
use crate::scanner::{Language, RepoInventory};
use crate::tools::ToolContext;

pub struct ComplexityAnalyzer<'a> {
    inventory: &'a RepoInventory,
    tools: &'a ToolContext<'a>,
}

impl<'a> ComplexityAnalyzer<'a> {
    pub fn new(inventory: &'a RepoInventory, tools: &'a ToolContext<'a>) -> Self {
        Self { inventory, tools }
    }

    pub fn analyze(&self) -> ComplexityResults {
        let inv = self.inventory;
        let mut results = ComplexityResults::default();
        let mut languages_analyzed = Vec::new();
        let mut scores = Vec::new();

        let mut merge = |label: &str, (lang, files): (LanguageComplexity, Vec<(String, FileMetrics)>)| {
            tracing::debug!(
                language = label,
                files = lang.files_analyzed,
                complexity = lang.total_complexity,
                "language complexity"
            );
            scores.extend_from_slice(&lang.complexity_scores);
            results.files.extend(files);
            results.by_language.insert(label.to_string(), lang);
            languages_analyzed.push(label.to_string());
        };

        if inv.has_language(Language::Python) {
            merge("Python", analyze_python(inv));
        }
        if inv.has_language(Language::JavaScript) || inv.has_language(Language::TypeScript) {
            merge("JavaScript/TypeScript", analyze_javascript(inv, self.tools));
        }
        if inv.has_language(Language::Go) {
            merge("Go", analyze_go(inv, self.tools));
        }
        if inv.has_language(Language::Java) {
            merge("Java", analyze_java(inv));
        }

        let total_files: usize = results.by_language.values().map(|l| l.files_analyzed).sum();
        let total_complexity: u32 = results.by_language.values().map(|l| l.total_complexity).sum();
        results.summary = ComplexitySummary {
            total_files,
            total_complexity,
            average_complexity: if total_files > 0 {
                f64::from(total_complexity) / total_files as f64
            } else {
                0.0
            },
            total_loc: results.by_language.values().map(|l| l.total_loc).sum(),
            total_lloc: results.by_language.values().map(|l| l.total_lloc).sum(),
            complexity_distribution: distribution(&scores),
            languages_analyzed,
        };
        tracing::info!(
            files = total_files,
            average = results.summary.average_complexity,
            "complexity analyzed"
        );
        results
    }
}
