//! Static analysis phase. Language-specific tools run for the primary
//! language; secret and dependency checks always run.

use super::ast_checks::run_ast_checks;
use super::linters::{run_eslint, run_mypy, run_pylint, run_tsc};
use super::security::{check_dependencies, check_secrets, run_bandit};
use super::types::StaticAnalysisResults;
use crate::scanner::RepoInventory;
use crate::tools::{ToolContext, ToolReport};

pub struct StaticAnalyzer<'a> {
    inventory: &'a RepoInventory,
    tools: &'a ToolContext<'a>,
}

impl<'a> StaticAnalyzer<'a> {
    pub fn new(inventory: &'a RepoInventory, tools: &'a ToolContext<'a>) -> Self {
        Self { inventory, tools }
    }

    pub fn analyze(&self, primary_language: &str) -> StaticAnalysisResults {
        let root = self.inventory.root();
        let mut results = StaticAnalysisResults::default();

        match primary_language {
            "Python" => {
                results.linting.pylint = Some(run_pylint(root, self.tools));
                results.type_checking.mypy = Some(run_mypy(root, self.tools));
                results.security.bandit = Some(run_bandit(root, self.tools));
                results.ast_analysis = Some(ToolReport::completed(run_ast_checks(self.inventory)));
            }
            "JavaScript" | "TypeScript" => {
                results.linting.eslint = Some(run_eslint(root, self.tools));
                if root.join("tsconfig.json").exists() {
                    results.type_checking.tsc = Some(run_tsc(root, self.tools));
                }
            }
            other => tracing::debug!(language = other, "no language-specific static analysis"),
        }

        results.security.secrets = Some(check_secrets(self.inventory, self.tools));
        results.security.dependencies = check_dependencies(root, self.tools);

        tracing::info!(
            total_issues = results.total_issues(),
            security_findings = results.security.findings(),
            "static analysis complete"
        );
        results
    }
}
