//! Evidence gathered by earlier phases, consulted when verifying claims.

use rustc_hash::FxHashSet;

use crate::scanner::RepoInventory;

const BENCHMARK_MARKERS: &[&str] = &["benchmark", "perf", "performance", "bench"];

/// Outcome of the test phase as seen by the claim verifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestEvidence {
    pub total: usize,
    pub failed: usize,
}

impl TestEvidence {
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.failed == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evidence {
    /// Files whose name marks them as benchmarks.
    pub benchmark_files: Vec<String>,
    /// At least one security scanner completed.
    pub security_scan_completed: bool,
    /// Files named in security findings.
    pub security_finding_files: FxHashSet<String>,
    pub security_findings: usize,
    /// `None` when tests were skipped.
    pub tests: Option<TestEvidence>,
}

impl Evidence {
    /// Benchmark-looking files from the inventory; security and test
    /// evidence is filled in by the caller.
    pub fn from_inventory(inventory: &RepoInventory) -> Self {
        let benchmark_files = inventory
            .files()
            .iter()
            .filter(|rel| {
                rel.file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_lowercase)
                    .is_some_and(|name| BENCHMARK_MARKERS.iter().any(|m| name.contains(m)))
            })
            .map(|rel| rel.display().to_string())
            .collect();
        Self {
            benchmark_files,
            ..Default::default()
        }
    }

    /// Whether a security finding names one of `files`.
    pub fn findings_touch(&self, files: &[String]) -> bool {
        files.iter().any(|f| {
            self.security_finding_files
                .iter()
                .any(|hit| hit == f || hit.ends_with(&format!("/{f}")))
        })
    }
}
