//! Inline code references in documentation text.

use super::patterns::{compiled, RE_REF_CLASS, RE_REF_FILE, RE_REF_FUNCTION};

/// Backticked references: `a.b` / `f()` functions, `class X` / `X class`
/// classes, and `path/file.ext` files, in that order.
pub fn find_code_references(content: &str) -> Vec<String> {
    let mut refs = Vec::new();
    if let Some(re) = compiled(&RE_REF_FUNCTION) {
        refs.extend(re.captures_iter(content).map(|c| c[1].to_string()));
    }
    if let Some(re) = compiled(&RE_REF_CLASS) {
        for caps in re.captures_iter(content) {
            if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
                refs.push(name.as_str().to_string());
            }
        }
    }
    if let Some(re) = compiled(&RE_REF_FILE) {
        refs.extend(re.captures_iter(content).map(|c| c[1].to_string()));
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_each_reference_kind() {
        let refs = find_code_references(
            "Call `run()` on `class Engine`, see `src/engine.py` and `Loader class`.",
        );
        assert_eq!(refs, vec!["run()", "Engine", "Loader", "src/engine.py"]);
    }

    #[test]
    fn dotted_names_count_as_functions_and_files() {
        let refs = find_code_references("Use `config.load`.");
        assert_eq!(refs, vec!["config.load", "config.load"]);
    }
}
