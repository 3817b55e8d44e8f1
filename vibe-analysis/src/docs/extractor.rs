//! Claim extraction from Markdown, reStructuredText, plain text, and
//! Python docstrings.

use rustc_hash::FxHashSet;

use super::patterns::{claim_patterns, compiled, RE_CALL, RE_DIGIT, RE_MARKDOWN_LINK, RE_METHOD_CALL};
use super::types::{Claim, ClaimType};
use crate::parsers::PythonModule;

const GENERAL_SECTION: &str = "General";
const CODE_EXAMPLE_CONFIDENCE: f64 = 0.8;

const STRONG_WORDS: &[&str] = &["always", "never", "guaranteed", "must"];
const HEDGE_WORDS: &[&str] = &["may", "might", "possibly", "sometimes"];

/// Score a claim: base 0.5, adjusted for certainty words, numbers, and type.
pub fn claim_confidence(text: &str, claim_type: ClaimType) -> f64 {
    let lower = text.to_lowercase();
    let words: FxHashSet<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut confidence: f64 = 0.5;
    if STRONG_WORDS.iter().any(|w| words.contains(w)) {
        confidence += 0.2;
    }
    if HEDGE_WORDS.iter().any(|w| words.contains(w)) {
        confidence -= 0.2;
    }
    if compiled(&RE_DIGIT).is_some_and(|re| re.is_match(text)) {
        confidence += 0.1;
    }
    match claim_type {
        ClaimType::Api => confidence += 0.1,
        ClaimType::Performance => confidence += 0.05,
        _ => {}
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// Run every claim pattern over `text`, appending one claim per match.
pub fn extract_claims_from_text(
    text: &str,
    source_file: &str,
    line_number: usize,
    context: &str,
    out: &mut Vec<Claim>,
) {
    for claim_type in ClaimType::ALL {
        for pattern in claim_patterns(claim_type) {
            let Some(re) = compiled(*pattern) else {
                continue;
            };
            for caps in re.captures_iter(text) {
                let Some(body) = caps.get(2) else {
                    continue;
                };
                let claim_text = body.as_str().trim();
                if claim_text.is_empty() {
                    continue;
                }
                out.push(Claim::new(
                    claim_text,
                    source_file,
                    line_number,
                    claim_type,
                    claim_confidence(claim_text, claim_type),
                    context,
                ));
            }
        }
    }
}

/// Markdown: h1-h3 headings set the section, content lines are claim
/// candidates, fenced blocks become code examples.
pub fn extract_markdown(content: &str, source_file: &str) -> Vec<Claim> {
    let mut claims = Vec::new();
    let mut section = GENERAL_SECTION.to_string();
    let mut fence: Option<(usize, Vec<&str>)> = None;
    let mut block_index = 0;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            match fence.take() {
                Some((start_line, body)) => {
                    analyze_code_example(
                        &body.join("\n"),
                        source_file,
                        start_line,
                        &format!("code_block_{block_index}"),
                        &mut claims,
                    );
                    block_index += 1;
                }
                None => fence = Some((idx + 1, Vec::new())),
            }
            continue;
        }
        if let Some((_, body)) = fence.as_mut() {
            body.push(line);
            continue;
        }
        if trimmed.is_empty() || is_rule(trimmed) {
            continue;
        }
        if let Some((level, heading)) = markdown_heading(trimmed) {
            if level <= 3 {
                section = strip_inline_markup(heading);
            }
            continue;
        }
        let text = strip_inline_markup(strip_block_marker(trimmed));
        if !text.is_empty() {
            extract_claims_from_text(&text, source_file, idx + 1, &section, &mut claims);
        }
    }
    claims
}

/// reStructuredText: a line followed by an `=`/`-`/`~` underline is a header.
pub fn extract_rst(content: &str, source_file: &str) -> Vec<Claim> {
    let mut claims = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut section = GENERAL_SECTION.to_string();

    for (idx, line) in lines.iter().enumerate() {
        let is_header = lines.get(idx + 1).is_some_and(|next| {
            let next = next.trim();
            !next.is_empty() && next.chars().all(|c| matches!(c, '=' | '-' | '~'))
        });
        if is_header {
            section = line.trim().to_string();
        } else if !line.trim().is_empty() {
            extract_claims_from_text(line, source_file, idx + 1, &section, &mut claims);
        }
    }
    claims
}

/// Plain text: every non-empty line.
pub fn extract_plain(content: &str, source_file: &str) -> Vec<Claim> {
    let mut claims = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if !line.trim().is_empty() {
            extract_claims_from_text(line, source_file, idx + 1, GENERAL_SECTION, &mut claims);
        }
    }
    claims
}

/// Module, class, and function docstrings of a parsed Python file.
pub fn extract_docstrings(module: &PythonModule, source_file: &str) -> Vec<Claim> {
    let mut claims = Vec::new();
    if let Some(doc) = &module.module_docstring {
        extract_claims_from_text(doc, source_file, 0, "docstring", &mut claims);
    }
    for def in &module.definitions {
        if let Some(doc) = &def.docstring {
            extract_claims_from_text(doc, source_file, def.line, "docstring", &mut claims);
        }
    }
    claims
}

/// Calls in a code example are implicit API claims.
pub fn analyze_code_example(
    code: &str,
    source_file: &str,
    line_number: usize,
    example_id: &str,
    out: &mut Vec<Claim>,
) {
    let context = format!("code_example_{example_id}");
    if let Some(re) = compiled(&RE_CALL) {
        for caps in re.captures_iter(code) {
            out.push(Claim::new(
                format!("Function '{}' exists and can be called", &caps[1]),
                source_file,
                line_number,
                ClaimType::Api,
                CODE_EXAMPLE_CONFIDENCE,
                context.as_str(),
            ));
        }
    }
    if let Some(re) = compiled(&RE_METHOD_CALL) {
        for caps in re.captures_iter(code) {
            out.push(Claim::new(
                format!("Object '{}' has method '{}'", &caps[1], &caps[2]),
                source_file,
                line_number,
                ClaimType::Api,
                CODE_EXAMPLE_CONFIDENCE,
                context.as_str(),
            ));
        }
    }
}

fn markdown_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim()))
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3
        && (line.chars().all(|c| c == '-' || c == ' ')
            || line.chars().all(|c| c == '*' || c == ' ')
            || line.chars().all(|c| c == '_' || c == ' '))
}

fn strip_block_marker(line: &str) -> &str {
    let line = line.trim_start_matches('>').trim_start();
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim_start();
        }
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim_start();
        }
    }
    line
}

fn strip_inline_markup(text: &str) -> String {
    let unlinked = match compiled(&RE_MARKDOWN_LINK) {
        Some(re) => re.replace_all(text, "$1").into_owned(),
        None => text.to_string(),
    };
    unlinked
        .replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_adjustments() {
        assert_eq!(claim_confidence("parse files", ClaimType::Feature), 0.5);
        assert_eq!(claim_confidence("always returns 200", ClaimType::Api), 0.9);
        assert_eq!(claim_confidence("might be slow", ClaimType::Performance), 0.35);
        assert_eq!(claim_confidence("whenever mayor", ClaimType::Feature), 0.5);
    }

    #[test]
    fn markdown_sections_and_lines() {
        let md = "# Overview\n\nThe tool supports TOML config.\n\n#### Deep\n\n- It can run offline.\n";
        let claims = extract_markdown(md, "README.md");
        let supports = claims
            .iter()
            .find(|c| c.claim_type == ClaimType::Feature && c.text == "TOML config.")
            .unwrap();
        assert_eq!(supports.context, "Overview");
        assert_eq!(supports.line_number, 3);
        let offline = claims.iter().find(|c| c.text == "run offline.").unwrap();
        assert_eq!(offline.line_number, 7);
        assert_eq!(offline.context, "Overview");
    }

    #[test]
    fn fenced_blocks_become_api_claims() {
        let md = "Intro\n```python\nclient = Client()\nclient.fetch(1)\n```\n";
        let claims = extract_markdown(md, "README.md");
        let texts: Vec<&str> = claims.iter().map(|c| c.text.as_str()).collect();
        assert!(texts.contains(&"Function 'Client' exists and can be called"));
        assert!(texts.contains(&"Function 'fetch' exists and can be called"));
        assert!(texts.contains(&"Object 'client' has method 'fetch'"));
        assert!(claims
            .iter()
            .all(|c| c.context == "code_example_code_block_0" && c.confidence == 0.8));
    }

    #[test]
    fn rst_headers_set_context() {
        let rst = "Security\n========\nAll traffic is encrypted with TLS.\n";
        let claims = extract_rst(rst, "docs/index.rst");
        assert!(claims.iter().all(|c| c.context == "Security"));
        assert!(claims.iter().any(|c| c.text == "with TLS."));
    }

    #[test]
    fn plain_text_uses_line_numbers() {
        let claims = extract_plain("\nIt returns a list\n", "NOTES.txt");
        let api = claims.iter().find(|c| c.claim_type == ClaimType::Api).unwrap();
        assert_eq!(api.text, "a list");
        assert_eq!(api.line_number, 2);
    }
}
