//! Formal verification phase: per-language provers, model checkers and
//! contract checkers, each run only when installed and relevant.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use super::parse::{parse_cbmc, parse_crosshair, parse_frama_c, parse_json_lines, parse_openjml};
use super::types::{FormalFinding, FormalReport, FormalResults};
use crate::scanner::{Language, RepoInventory};
use crate::tools::{truncate_tail, ToolContext, ToolOutput, ToolReport};

/// Per-file tools stop after this many files.
pub const MAX_FILES_PER_TOOL: usize = 10;
const OUTPUT_TAIL_CHARS: usize = 2000;
const KEY_JAR: &str = "/opt/key/key.jar";

/// Tool name and the binary whose presence means it is installed.
pub const FORMAL_TOOLS: &[(&str, &str)] = &[
    ("prusti", "cargo-prusti"),
    ("kani", "cargo-kani"),
    ("miri", "cargo-miri"),
    ("cbmc", "cbmc"),
    ("frama-c", "frama-c"),
    ("openjml", "openjml"),
    ("myth", "myth"),
    ("slither", "slither"),
    ("crosshair", "crosshair"),
    ("flow", "flow"),
    ("staticcheck", "staticcheck"),
    ("gosec", "gosec"),
];

type Checks = BTreeMap<String, FormalReport>;

pub struct FormalVerifier<'a> {
    inventory: &'a RepoInventory,
    tools: &'a ToolContext<'a>,
    available: BTreeMap<String, bool>,
}

impl<'a> FormalVerifier<'a> {
    pub fn new(inventory: &'a RepoInventory, tools: &'a ToolContext<'a>) -> Self {
        let available = available_tools(tools);
        Self {
            inventory,
            tools,
            available,
        }
    }

    pub fn verify(&self) -> FormalResults {
        let mut contracts = BTreeMap::new();
        let inv = self.inventory;

        if inv.has_language(Language::Rust) {
            contracts.insert("rust".to_string(), self.verify_rust());
        }
        if inv.has_language(Language::C) || inv.has_language(Language::Cpp) {
            contracts.insert("c_cpp".to_string(), self.verify_c());
        }
        if inv.has_language(Language::Java) {
            contracts.insert("java".to_string(), self.verify_java());
        }
        if inv.has_language(Language::Solidity) {
            contracts.insert("solidity".to_string(), self.verify_solidity());
        }
        if inv.has_language(Language::Python) {
            contracts.insert("python".to_string(), self.verify_python());
        }
        if inv.has_language(Language::JavaScript) && inv.root().join(".flowconfig").exists() {
            contracts.insert("javascript".to_string(), self.verify_flow());
        }
        if inv.has_language(Language::Go) {
            contracts.insert("go".to_string(), self.verify_go());
        }

        let results = FormalResults {
            available_tools: self.available.clone(),
            contracts,
        };
        tracing::info!(
            checks = results.checks_performed(),
            languages = ?results.languages_checked(),
            "formal verification complete"
        );
        results
    }

    fn has(&self, tool: &str) -> bool {
        self.available.get(tool).copied().unwrap_or(false)
    }

    fn root(&self) -> &Path {
        self.inventory.root()
    }

    fn verify_rust(&self) -> Checks {
        let mut checks = Checks::new();
        if self.has("prusti") {
            let inv = self.tools.command("cargo", self.root()).arg("prusti");
            checks.insert("prusti".into(), run_with(self.tools, &inv, verified_by_exit));
        }
        if self.has("kani") {
            let inv = self.tools.command("cargo", self.root()).arg("kani");
            checks.insert("kani".into(), run_with(self.tools, &inv, verified_by_exit));
        }
        if self.has("miri") {
            let inv = self
                .tools
                .command("cargo", self.root())
                .args(["+nightly", "miri", "test"]);
            checks.insert(
                "miri".into(),
                run_with(self.tools, &inv, |out| FormalFinding {
                    ub_detected: Some(out.stderr.contains("undefined behavior")),
                    output: Some(truncate_tail(&out.stderr, OUTPUT_TAIL_CHARS)),
                    ..FormalFinding::default()
                }),
            );
        }
        checks
    }

    /// CBMC and Frama-C both run once per file, up to `MAX_FILES_PER_TOOL`.
    /// Frama-C gets a separate `-wp -wp-rte` run per translation unit rather
    /// than one run over all C files, so its proof counts are keyed
    /// `frama-c:<file>` like the CBMC results.
    fn verify_c(&self) -> Checks {
        let mut checks = Checks::new();
        let c_files = self.inventory.files_of(Language::C);
        if self.has("cbmc") {
            let sources = c_files
                .iter()
                .chain(self.inventory.files_of(Language::Cpp))
                .filter(|p| p.extension().is_some_and(|e| e == "c" || e == "cpp"));
            for file in sources.take(MAX_FILES_PER_TOOL) {
                let inv = self.tools.command("cbmc", self.root()).args([
                    path_arg(file),
                    "--bounds-check".into(),
                    "--pointer-check".into(),
                    "--div-by-zero-check".into(),
                ]);
                let report = run_with(self.tools, &inv, |out| {
                    let text = combined(out);
                    FormalFinding {
                        verified: Some(text.contains("VERIFICATION SUCCESSFUL")),
                        issues: parse_cbmc(&text),
                        ..FormalFinding::default()
                    }
                });
                checks.insert(file_key("cbmc", file), report);
            }
        }
        if self.has("frama-c") {
            for file in c_files.iter().take(MAX_FILES_PER_TOOL) {
                let inv = self
                    .tools
                    .command("frama-c", self.root())
                    .args(["-wp".into(), "-wp-rte".into(), path_arg(file)]);
                let report = run_with(self.tools, &inv, |out| FormalFinding {
                    wp: Some(parse_frama_c(&out.stdout)),
                    ..FormalFinding::default()
                });
                checks.insert(file_key("frama-c", file), report);
            }
        }
        checks
    }

    fn verify_java(&self) -> Checks {
        let mut checks = Checks::new();
        if !self.has("openjml") {
            return checks;
        }
        for file in self.inventory.files_of(Language::Java).iter().take(MAX_FILES_PER_TOOL) {
            let inv = self
                .tools
                .command("openjml", self.root())
                .args(["-check".into(), path_arg(file)]);
            let report = run_with(self.tools, &inv, |out| {
                let issues = parse_openjml(&combined(out));
                FormalFinding {
                    verified: Some(out.success() && issues.is_empty()),
                    issues,
                    ..FormalFinding::default()
                }
            });
            checks.insert(file_key("openjml", file), report);
        }
        checks
    }

    fn verify_solidity(&self) -> Checks {
        let mut checks = Checks::new();
        if self.has("myth") {
            for file in self
                .inventory
                .files_of(Language::Solidity)
                .iter()
                .take(MAX_FILES_PER_TOOL)
            {
                let inv = self.tools.command("myth", self.root()).args([
                    "analyze".into(),
                    path_arg(file),
                    "-o".into(),
                    "json".into(),
                ]);
                checks.insert(file_key("myth", file), run_with(self.tools, &inv, json_report));
            }
        }
        if self.has("slither") {
            let inv = self
                .tools
                .command("slither", self.root())
                .args([".", "--json", "-"]);
            checks.insert("slither".into(), run_with(self.tools, &inv, json_report));
        }
        checks
    }

    fn verify_python(&self) -> Checks {
        let mut checks = Checks::new();
        if !self.has("crosshair") {
            return checks;
        }
        let timeout = Duration::from_secs(self.tools.config.effective_crosshair_timeout_secs());
        for file in self
            .inventory
            .files_of(Language::Python)
            .iter()
            .take(MAX_FILES_PER_TOOL)
        {
            let inv = self
                .tools
                .command("crosshair", self.root())
                .args(["check".into(), path_arg(file)])
                .timeout(timeout);
            let report = run_with(self.tools, &inv, |out| {
                let counterexamples = parse_crosshair(&combined(out));
                FormalFinding {
                    verified: Some(counterexamples.is_empty()),
                    counterexamples,
                    ..FormalFinding::default()
                }
            });
            checks.insert(file_key("crosshair", file), report);
        }
        checks
    }

    fn verify_flow(&self) -> Checks {
        let mut checks = Checks::new();
        if self.has("flow") {
            let inv = self.tools.command("flow", self.root()).args(["check", "--json"]);
            checks.insert("flow".into(), run_with(self.tools, &inv, json_report));
        }
        checks
    }

    fn verify_go(&self) -> Checks {
        let mut checks = Checks::new();
        if self.has("staticcheck") {
            let inv = self
                .tools
                .command("staticcheck", self.root())
                .args(["-f", "json", "./..."]);
            let report = run_with(self.tools, &inv, |out| {
                let issues: Vec<String> = parse_json_lines(&out.stdout)
                    .iter()
                    .map(|v| {
                        let code = v.get("code").and_then(|c| c.as_str()).unwrap_or("");
                        let message = v.get("message").and_then(|m| m.as_str()).unwrap_or("");
                        format!("{code}: {message}")
                    })
                    .collect();
                FormalFinding {
                    verified: Some(issues.is_empty()),
                    issues,
                    ..FormalFinding::default()
                }
            });
            checks.insert("staticcheck".into(), report);
        }
        if self.has("gosec") {
            let inv = self
                .tools
                .command("gosec", self.root())
                .args(["-fmt", "json", "./..."]);
            checks.insert("gosec".into(), run_with(self.tools, &inv, json_report));
        }
        checks
    }
}

/// Which formal tools are installed and enabled.
pub fn available_tools(tools: &ToolContext<'_>) -> BTreeMap<String, bool> {
    let mut found: BTreeMap<String, bool> = FORMAL_TOOLS
        .iter()
        .map(|(name, binary)| ((*name).to_string(), tools.available(binary)))
        .collect();
    found.insert(
        "key".to_string(),
        !tools.config.is_disabled("key") && Path::new(KEY_JAR).exists(),
    );
    found
}

fn run_with(
    tools: &ToolContext<'_>,
    invocation: &crate::tools::ToolInvocation,
    interpret: impl FnOnce(&ToolOutput) -> FormalFinding,
) -> FormalReport {
    match tools.invoke(invocation) {
        Ok(out) => ToolReport::completed(interpret(&out)),
        Err(status) => ToolReport::from_status(status),
    }
}

fn verified_by_exit(out: &ToolOutput) -> FormalFinding {
    FormalFinding {
        verified: Some(out.success()),
        output: Some(truncate_tail(&combined(out), OUTPUT_TAIL_CHARS)),
        ..FormalFinding::default()
    }
}

/// Tools that print a JSON document; non-JSON output is kept as text.
fn json_report(out: &ToolOutput) -> FormalFinding {
    match serde_json::from_str(out.stdout.trim()) {
        Ok(report) => FormalFinding {
            report: Some(report),
            ..FormalFinding::default()
        },
        Err(_) => FormalFinding {
            output: Some(truncate_tail(&combined(out), OUTPUT_TAIL_CHARS)),
            ..FormalFinding::default()
        },
    }
}

fn combined(out: &ToolOutput) -> String {
    if out.stderr.is_empty() {
        out.stdout.clone()
    } else {
        format!("{}\n{}", out.stdout, out.stderr)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn file_key(tool: &str, file: &Path) -> String {
    format!("{tool}:{}", file.display())
}
