//! Python code checks over the tree-sitter model.

use std::path::PathBuf;

use rayon::prelude::*;

use super::types::{AstData, AstIssue};
use crate::parsers::{DefinitionKind, PythonModule, PythonParser};
use crate::scanner::{Language, RepoInventory};

/// Positional parameters above this count are reported.
pub const MAX_POSITIONAL_PARAMS: usize = 5;

/// Issues for one parsed file.
pub fn check_module(file: &str, module: &PythonModule) -> Vec<AstIssue> {
    if let Some((line, column)) = module.syntax_error {
        return vec![AstIssue {
            file: file.to_string(),
            line: Some(line),
            kind: "parse_error".to_string(),
            message: format!("invalid syntax (line {line}, column {column})"),
        }];
    }

    let mut issues = Vec::new();
    for def in &module.definitions {
        let is_class = def.kind == DefinitionKind::Class;
        if !is_class && def.positional_params > MAX_POSITIONAL_PARAMS {
            issues.push(AstIssue {
                file: file.to_string(),
                line: Some(def.line),
                kind: "too_many_arguments".to_string(),
                message: format!(
                    "Function '{}' has {} arguments (max recommended: {MAX_POSITIONAL_PARAMS})",
                    def.name, def.positional_params
                ),
            });
        }
        if def.docstring.is_none() {
            let label = if is_class { "Class" } else { "Function" };
            issues.push(AstIssue {
                file: file.to_string(),
                line: Some(def.line),
                kind: "missing_docstring".to_string(),
                message: format!("{label} '{}' is missing a docstring", def.name),
            });
        }
    }
    for &line in &module.bare_excepts {
        issues.push(AstIssue {
            file: file.to_string(),
            line: Some(line),
            kind: "bare_except".to_string(),
            message: "Bare except clause found (catches all exceptions)".to_string(),
        });
    }
    issues
}

/// Run the checks over every Python file in the inventory.
pub fn run_ast_checks(inventory: &RepoInventory) -> AstData {
    let files: Vec<&PathBuf> = inventory.files_of(Language::Python).iter().collect();
    let issues: Vec<AstIssue> = files
        .par_iter()
        .map_init(
            || PythonParser::new().ok(),
            |parser, rel| {
                let file = rel.display().to_string();
                let Some(content) = inventory.read(rel) else {
                    return Vec::new();
                };
                let Some(parser) = parser.as_mut() else {
                    return Vec::new();
                };
                match parser.analyze(&content, rel) {
                    Ok(module) => check_module(&file, &module),
                    Err(e) => vec![AstIssue {
                        file,
                        line: None,
                        kind: "parse_error".to_string(),
                        message: e.to_string(),
                    }],
                }
            },
        )
        .flatten()
        .collect();
    AstData {
        total_issues: issues.len(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn issues(src: &str) -> Vec<AstIssue> {
        let module = PythonParser::new().unwrap().analyze(src, Path::new("m.py")).unwrap();
        check_module("m.py", &module)
    }

    #[test]
    fn reports_each_check() {
        let found = issues(
            "def wide(a, b, c, d, e, f):\n    \"\"\"Doc.\"\"\"\n    try:\n        pass\n    except:\n        pass\n\nclass Bare:\n    pass\n",
        );
        let kinds: Vec<&str> = found.iter().map(|i| i.kind.as_str()).collect();
        assert_eq!(kinds, vec!["too_many_arguments", "missing_docstring", "bare_except"]);
        assert_eq!(found[0].message, "Function 'wide' has 6 arguments (max recommended: 5)");
        assert_eq!(found[1].message, "Class 'Bare' is missing a docstring");
        assert_eq!(found[2].line, Some(5));
    }

    #[test]
    fn self_counts_as_positional() {
        let found = issues("class K:\n    \"\"\"K.\"\"\"\n    def m(self, a, b, c, d, e):\n        \"\"\"M.\"\"\"\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "too_many_arguments");
    }

    #[test]
    fn syntax_errors_short_circuit() {
        let found = issues("def broken(:\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "parse_error");
    }
}
