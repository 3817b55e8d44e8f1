//! Python source model using native tree-sitter.
//!
//! One parse yields everything the pipeline needs from a Python file:
//! definitions with docstrings and cyclomatic complexity, bare `except`
//! clauses, raw line metrics, and Halstead counts.

use std::path::Path;

use rustc_hash::FxHashSet;
use tree_sitter::{Node, Parser, Tree};
use vibe_core::errors::ParseError;

/// Kind of a Python definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Function,
    Method,
    Class,
}

impl DefinitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Class => "class",
        }
    }
}

/// A function, method, or class definition.
#[derive(Debug, Clone)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    /// 1-based line of the `def`/`class` keyword.
    pub line: usize,
    pub class_name: Option<String>,
    pub docstring: Option<String>,
    /// Positional parameters after any `/` and before `*`/`*args`.
    pub positional_params: usize,
    /// Cyclomatic complexity; 0 for classes.
    pub complexity: u32,
}

/// Line-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawMetrics {
    pub loc: usize,
    pub lloc: usize,
    pub sloc: usize,
    pub comments: usize,
    pub multi: usize,
    pub blank: usize,
}

/// Operator/operand tallies for Halstead volume.
#[derive(Debug, Clone, Default)]
pub struct HalsteadCounts {
    pub distinct_operators: usize,
    pub distinct_operands: usize,
    pub total_operators: usize,
    pub total_operands: usize,
}

impl HalsteadCounts {
    pub fn volume(&self) -> f64 {
        let vocabulary = (self.distinct_operators + self.distinct_operands) as f64;
        let length = (self.total_operators + self.total_operands) as f64;
        if vocabulary <= 1.0 {
            return 0.0;
        }
        length * vocabulary.log2()
    }
}

/// Everything extracted from one Python file.
#[derive(Debug, Clone, Default)]
pub struct PythonModule {
    pub module_docstring: Option<String>,
    pub definitions: Vec<Definition>,
    /// 1-based lines of `except:` clauses without an exception type.
    pub bare_excepts: Vec<usize>,
    pub raw: RawMetrics,
    pub halstead: HalsteadCounts,
    /// First syntax error position, if the tree contains error nodes.
    pub syntax_error: Option<(usize, usize)>,
}

impl PythonModule {
    pub fn functions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions
            .iter()
            .filter(|d| d.kind != DefinitionKind::Class)
    }

    pub fn total_complexity(&self) -> u32 {
        self.functions().map(|d| d.complexity).sum()
    }
}

const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "except_clause",
    "except_group_clause",
    "with_statement",
    "assert_statement",
    "conditional_expression",
    "boolean_operator",
    "for_in_clause",
    "if_clause",
    "case_clause",
];

const OPERAND_KINDS: &[&str] = &[
    "identifier",
    "integer",
    "float",
    "string_content",
    "true",
    "false",
    "none",
];

const OPERATOR_TOKENS: &[&str] = &[
    "+", "-", "*", "/", "//", "%", "**", "@", "<<", ">>", "&", "|", "^", "~", "<", ">", "<=",
    ">=", "==", "!=", "<>", "=", "+=", "-=", "*=", "/=", "//=", "%=", "**=", "@=", "<<=", ">>=",
    "&=", "|=", "^=", ":=", "and", "or", "not", "in", "is",
];

/// Stateful Python parser; reuse one per thread.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|_| ParseError::GrammarUnavailable {
                language: "python".to_string(),
            })?;
        Ok(Self { parser })
    }

    pub fn parse_tree(&mut self, source: &str, path: &Path) -> Result<Tree, ParseError> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| ParseError::SourceFailed {
                path: path.to_path_buf(),
                message: "tree-sitter returned no tree".to_string(),
            })
    }

    /// Parse and extract the full module model.
    pub fn analyze(&mut self, source: &str, path: &Path) -> Result<PythonModule, ParseError> {
        let tree = self.parse_tree(source, path)?;
        let root = tree.root_node();
        let bytes = source.as_bytes();

        let mut module = PythonModule {
            module_docstring: body_docstring(root, bytes),
            syntax_error: first_error(root),
            ..Default::default()
        };

        collect_definitions(root, bytes, None, &mut module);
        collect_bare_excepts(root, &mut module.bare_excepts);
        module.raw = raw_metrics(source, root);
        module.halstead = halstead(root, bytes);
        Ok(module)
    }
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::with_capacity(node.child_count());
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            out.push(child);
        }
    }
    out
}

fn text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn first_error(node: Node<'_>) -> Option<(usize, usize)> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column));
    }
    children(node).into_iter().find_map(first_error)
}

/// Docstring of a module node or of a definition's `body` block.
fn body_docstring(node: Node<'_>, source: &[u8]) -> Option<String> {
    let body = if node.kind() == "module" {
        node
    } else {
        node.child_by_field_name("body")?
    };
    let first = children(body)
        .into_iter()
        .find(|c| c.is_named() && c.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = children(first).into_iter().find(|c| c.is_named())?;
    if expr.kind() != "string" && expr.kind() != "concatenated_string" {
        return None;
    }
    let cleaned = clean_docstring(&string_literal_value(text(expr, source)));
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Strip prefixes and quotes from a string literal's source text.
fn string_literal_value(raw: &str) -> String {
    let trimmed = raw.trim_start_matches(|c: char| "rRuUbBfF".contains(c));
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    trimmed.to_string()
}

/// Dedent a docstring the way `inspect.cleandoc` does.
pub fn clean_docstring(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    let indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l))
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    out.push(lines[0].trim().to_string());
    for line in lines.iter().skip(1) {
        let skip = leading_whitespace(line).min(indent);
        let start = line.char_indices().nth(skip).map_or(line.len(), |(i, _)| i);
        out.push(line[start..].trim_end().to_string());
    }
    while out.first().is_some_and(|l| l.is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Indentation width in characters, not bytes.
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn collect_definitions(
    node: Node<'_>,
    source: &[u8],
    class_name: Option<&str>,
    module: &mut PythonModule,
) {
    for child in children(node) {
        match child.kind() {
            "function_definition" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| text(n, source).to_string())
                    .unwrap_or_default();
                let kind = if class_name.is_some() {
                    DefinitionKind::Method
                } else {
                    DefinitionKind::Function
                };
                module.definitions.push(Definition {
                    name,
                    kind,
                    line: child.start_position().row + 1,
                    class_name: class_name.map(str::to_string),
                    docstring: body_docstring(child, source),
                    positional_params: child
                        .child_by_field_name("parameters")
                        .map(positional_param_count)
                        .unwrap_or(0),
                    complexity: 1 + child
                        .child_by_field_name("body")
                        .map(decision_points)
                        .unwrap_or(0),
                });
                // Nested functions are reported on their own.
                if let Some(body) = child.child_by_field_name("body") {
                    collect_definitions(body, source, None, module);
                }
            }
            "class_definition" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| text(n, source).to_string())
                    .unwrap_or_default();
                module.definitions.push(Definition {
                    name: name.clone(),
                    kind: DefinitionKind::Class,
                    line: child.start_position().row + 1,
                    class_name: class_name.map(str::to_string),
                    docstring: body_docstring(child, source),
                    positional_params: 0,
                    complexity: 0,
                });
                if let Some(body) = child.child_by_field_name("body") {
                    collect_definitions(body, source, Some(&name), module);
                }
            }
            _ => collect_definitions(child, source, class_name, module),
        }
    }
}

/// Decision points inside a function body, not descending into nested
/// function or class definitions.
fn decision_points(node: Node<'_>) -> u32 {
    let mut count = 0;
    for child in children(node) {
        match child.kind() {
            "function_definition" | "class_definition" => {}
            kind => {
                if DECISION_KINDS.contains(&kind) {
                    count += 1;
                }
                count += decision_points(child);
            }
        }
    }
    count
}

fn positional_param_count(params: Node<'_>) -> usize {
    let mut count = 0;
    for param in children(params) {
        match param.kind() {
            "identifier" | "default_parameter" | "typed_default_parameter" => count += 1,
            "typed_parameter" => {
                let splat = children(param).into_iter().any(|c| {
                    matches!(c.kind(), "list_splat_pattern" | "dictionary_splat_pattern")
                });
                if splat {
                    break;
                }
                count += 1;
            }
            // Everything before `/` is positional-only.
            "positional_separator" => count = 0,
            "list_splat_pattern" | "keyword_separator" | "dictionary_splat_pattern" => break,
            _ => {}
        }
    }
    count
}

fn collect_bare_excepts(node: Node<'_>, out: &mut Vec<usize>) {
    for child in children(node) {
        if child.kind() == "except_clause" {
            let typed = children(child)
                .into_iter()
                .any(|c| c.is_named() && c.kind() != "block" && c.kind() != "comment");
            if !typed {
                out.push(child.start_position().row + 1);
            }
        }
        collect_bare_excepts(child, out);
    }
}

fn raw_metrics(source: &str, root: Node<'_>) -> RawMetrics {
    let lines: Vec<&str> = source.lines().collect();
    let mut multi_lines: FxHashSet<usize> = FxHashSet::default();
    mark_docstring_lines(root, &mut multi_lines);

    let mut metrics = RawMetrics {
        loc: lines.len(),
        ..Default::default()
    };
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if multi_lines.contains(&i) {
            metrics.multi += 1;
        } else if trimmed.is_empty() {
            metrics.blank += 1;
        } else if trimmed.starts_with('#') {
            metrics.comments += 1;
        } else {
            metrics.sloc += 1;
        }
    }
    metrics.lloc = count_statements(root);
    metrics
}

/// Mark rows covered by standalone string expressions (docstrings and
/// other bare string literals).
fn mark_docstring_lines(node: Node<'_>, rows: &mut FxHashSet<usize>) {
    for child in children(node) {
        if child.kind() == "expression_statement" {
            let only_string = {
                let named: Vec<Node<'_>> =
                    children(child).into_iter().filter(|c| c.is_named()).collect();
                named.len() == 1 && matches!(named[0].kind(), "string" | "concatenated_string")
            };
            if only_string {
                for row in child.start_position().row..=child.end_position().row {
                    rows.insert(row);
                }
                continue;
            }
        }
        mark_docstring_lines(child, rows);
    }
}

fn count_statements(node: Node<'_>) -> usize {
    let mut count = 0;
    for child in children(node) {
        let kind = child.kind();
        if kind.ends_with("_statement") || kind == "function_definition" || kind == "class_definition"
        {
            count += 1;
        }
        count += count_statements(child);
    }
    count
}

fn halstead(root: Node<'_>, source: &[u8]) -> HalsteadCounts {
    let mut operators: FxHashSet<String> = FxHashSet::default();
    let mut operands: FxHashSet<String> = FxHashSet::default();
    let mut counts = HalsteadCounts::default();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.child_count() == 0 {
            let kind = node.kind();
            if OPERAND_KINDS.contains(&kind) {
                counts.total_operands += 1;
                operands.insert(text(node, source).to_string());
            } else if OPERATOR_TOKENS.contains(&kind) {
                counts.total_operators += 1;
                operators.insert(kind.to_string());
            }
        } else {
            stack.extend(children(node));
        }
    }
    counts.distinct_operators = operators.len();
    counts.distinct_operands = operands.len();
    counts
}
