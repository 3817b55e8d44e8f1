//! Python complexity: cyclomatic complexity per function, raw metrics, and
//! maintainability index from a single tree-sitter pass.

use std::path::PathBuf;

use rayon::prelude::*;

use super::types::{FileMetrics, FunctionComplexity, LanguageComplexity, Rank};
use crate::parsers::python::RawMetrics;
use crate::parsers::{PythonModule, PythonParser};
use crate::scanner::{Language, RepoInventory};

/// Maintainability index on a 0-100 scale.
///
/// `comments_pct` is the percentage of comment and docstring lines.
pub fn maintainability_index(volume: f64, complexity: u32, sloc: usize, comments_pct: f64) -> f64 {
    if volume <= 0.0 || sloc == 0 {
        return 100.0;
    }
    let raw = 171.0 - 5.2 * volume.ln() - 0.23 * f64::from(complexity) - 16.2 * (sloc as f64).ln()
        + 50.0 * (2.46 * comments_pct.to_radians()).sqrt().sin();
    (raw * 100.0 / 171.0).clamp(0.0, 100.0)
}

/// Comment and docstring lines as a percentage of source lines, which can
/// exceed 100 for heavily documented files.
pub fn comment_percentage(raw: &RawMetrics) -> f64 {
    if raw.sloc == 0 {
        return 0.0;
    }
    (raw.comments + raw.multi) as f64 / raw.sloc as f64 * 100.0
}

/// Metrics for one parsed module.
pub fn file_metrics(module: &PythonModule) -> FileMetrics {
    let functions: Vec<FunctionComplexity> = module
        .functions()
        .map(|def| FunctionComplexity {
            name: def.name.clone(),
            kind: def.kind.as_str().to_string(),
            complexity: def.complexity,
            rank: Rank::from_score(def.complexity),
            lineno: def.line,
            class_name: def.class_name.clone(),
        })
        .collect();
    let total = module.total_complexity();
    let raw = module.raw;
    let comments_pct = comment_percentage(&raw);
    FileMetrics {
        language: "Python".to_string(),
        loc: raw.loc,
        lloc: Some(raw.lloc),
        sloc: Some(raw.sloc),
        comments: Some(raw.comments),
        blank: Some(raw.blank),
        total_complexity: total,
        average_complexity: if functions.is_empty() {
            0.0
        } else {
            f64::from(total) / functions.len() as f64
        },
        maintainability_index: Some(maintainability_index(
            module.halstead.volume(),
            total,
            raw.sloc,
            comments_pct,
        )),
        functions,
    }
}

/// Analyze every Python file; files with syntax errors are skipped.
pub fn analyze_python(inventory: &RepoInventory) -> (LanguageComplexity, Vec<(String, FileMetrics)>) {
    let files: Vec<&PathBuf> = inventory.files_of(Language::Python).iter().collect();
    let analyzed: Vec<(String, FileMetrics)> = files
        .par_iter()
        .map_init(
            || PythonParser::new().ok(),
            |parser, rel| {
                let parser = parser.as_mut()?;
                let content = inventory.read(rel)?;
                let module = parser.analyze(&content, rel).ok()?;
                if let Some((line, _)) = module.syntax_error {
                    tracing::debug!(path = %rel.display(), line, "skipping file with syntax error");
                    return None;
                }
                Some((rel.display().to_string(), file_metrics(&module)))
            },
        )
        .flatten()
        .collect();

    let mut summary = LanguageComplexity::default();
    for (_, metrics) in &analyzed {
        summary.total_complexity += metrics.total_complexity;
        summary.total_loc += metrics.loc;
        summary.total_lloc += metrics.lloc.unwrap_or(0);
        summary
            .complexity_scores
            .extend(metrics.functions.iter().map(|f| f.complexity));
        summary.files_analyzed += 1;
    }
    (summary, analyzed)
}
