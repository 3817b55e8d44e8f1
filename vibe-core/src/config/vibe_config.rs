//! Top-level vibe-verifier configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::report_config::REDACT_LEVELS;
use super::{
    DocsConfig, GitConfig, PhaseConfig, ReportConfig, ScanConfig, TestConfig, ToolConfig,
};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`VIBE_*`)
/// 3. Explicit config file (`--config`)
/// 4. Project config (`vibe-verifier.toml` in the target root)
/// 5. User config (`~/.vibe-verifier/config.toml`)
/// 6. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VibeConfig {
    pub scan: ScanConfig,
    pub phases: PhaseConfig,
    pub tools: ToolConfig,
    pub docs: DocsConfig,
    pub git: GitConfig,
    pub tests: TestConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub format: Option<String>,
    pub skip_tests: Option<bool>,
    pub skip_verification: Option<bool>,
    pub quick: Option<bool>,
    pub sanitize: Option<bool>,
    pub redact_level: Option<String>,
    pub save_raw_results: Option<bool>,
}

impl VibeConfig {
    /// Load configuration for the repository at `root`.
    ///
    /// `explicit` is a config file named on the command line; unlike the
    /// user and project files it must exist.
    pub fn load(
        root: &Path,
        explicit: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            Self::merge_toml_file(&mut config, path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &VibeConfig) -> Result<(), ConfigError> {
        if let Some(ref level) = config.report.redact_level {
            if !REDACT_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.redact_level".to_string(),
                    message: format!("must be one of {}", REDACT_LEVELS.join(", ")),
                });
            }
        }
        if let Some(ref format) = config.report.format {
            if format != "console" && format != "json" {
                return Err(ConfigError::ValidationFailed {
                    field: "report.format".to_string(),
                    message: "must be console or json".to_string(),
                });
            }
        }
        let timeouts = [
            ("tools.timeout_secs", config.tools.timeout_secs),
            ("tools.crosshair_timeout_secs", config.tools.crosshair_timeout_secs),
            ("tests.timeout_secs", config.tests.timeout_secs),
        ];
        for (field, value) in timeouts {
            if value == Some(0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(threshold) = config.docs.high_confidence_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "docs.high_confidence_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut VibeConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: VibeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut VibeConfig, other: &VibeConfig) {
        // Scan
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.respect_gitignore.is_some() {
            base.scan.respect_gitignore = other.scan.respect_gitignore;
        }

        // Phases
        if other.phases.skip_tests.is_some() {
            base.phases.skip_tests = other.phases.skip_tests;
        }
        if other.phases.skip_verification.is_some() {
            base.phases.skip_verification = other.phases.skip_verification;
        }
        if other.phases.quick.is_some() {
            base.phases.quick = other.phases.quick;
        }

        // Tools
        if other.tools.timeout_secs.is_some() {
            base.tools.timeout_secs = other.tools.timeout_secs;
        }
        if other.tools.crosshair_timeout_secs.is_some() {
            base.tools.crosshair_timeout_secs = other.tools.crosshair_timeout_secs;
        }
        if !other.tools.disabled.is_empty() {
            base.tools.disabled = other.tools.disabled.clone();
        }

        // Docs
        if other.docs.inline_docs.is_some() {
            base.docs.inline_docs = other.docs.inline_docs;
        }
        if other.docs.high_confidence_threshold.is_some() {
            base.docs.high_confidence_threshold = other.docs.high_confidence_threshold;
        }

        // Git
        if other.git.max_commits.is_some() {
            base.git.max_commits = other.git.max_commits;
        }
        if other.git.enabled.is_some() {
            base.git.enabled = other.git.enabled;
        }

        // Tests
        if other.tests.timeout_secs.is_some() {
            base.tests.timeout_secs = other.tests.timeout_secs;
        }
        if other.tests.install_node_modules.is_some() {
            base.tests.install_node_modules = other.tests.install_node_modules;
        }
        if other.tests.output_tail_chars.is_some() {
            base.tests.output_tail_chars = other.tests.output_tail_chars;
        }

        // Report
        if other.report.output_dir.is_some() {
            base.report.output_dir = other.report.output_dir.clone();
        }
        if other.report.format.is_some() {
            base.report.format = other.report.format.clone();
        }
        if other.report.sanitize.is_some() {
            base.report.sanitize = other.report.sanitize;
        }
        if other.report.redact_level.is_some() {
            base.report.redact_level = other.report.redact_level.clone();
        }
        if other.report.save_raw_results.is_some() {
            base.report.save_raw_results = other.report.save_raw_results;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VIBE_SKIP_TESTS`, `VIBE_REDACT_LEVEL`, `VIBE_TOOL_TIMEOUT_SECS`, etc.
    fn apply_env_overrides(config: &mut VibeConfig) {
        if let Some(v) = env_parse::<bool>("VIBE_SKIP_TESTS") {
            config.phases.skip_tests = Some(v);
        }
        if let Some(v) = env_parse::<bool>("VIBE_SKIP_VERIFICATION") {
            config.phases.skip_verification = Some(v);
        }
        if let Some(v) = env_parse::<bool>("VIBE_QUICK") {
            config.phases.quick = Some(v);
        }
        if let Some(v) = env_parse::<u64>("VIBE_TOOL_TIMEOUT_SECS") {
            config.tools.timeout_secs = Some(v);
        }
        if let Some(v) = env_parse::<u64>("VIBE_TEST_TIMEOUT_SECS") {
            config.tests.timeout_secs = Some(v);
        }
        if let Some(v) = env_parse::<u64>("VIBE_SCAN_MAX_FILE_SIZE") {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = env_parse::<usize>("VIBE_GIT_MAX_COMMITS") {
            config.git.max_commits = Some(v);
        }
        if let Some(v) = env_parse::<bool>("VIBE_SANITIZE") {
            config.report.sanitize = Some(v);
        }
        if let Ok(val) = std::env::var("VIBE_REDACT_LEVEL") {
            config.report.redact_level = Some(val);
        }
        if let Ok(val) = std::env::var("VIBE_OUTPUT_DIR") {
            config.report.output_dir = Some(PathBuf::from(val));
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut VibeConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.output_dir {
            config.report.output_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.format {
            config.report.format = Some(v.clone());
        }
        if let Some(v) = cli.skip_tests {
            config.phases.skip_tests = Some(v);
        }
        if let Some(v) = cli.skip_verification {
            config.phases.skip_verification = Some(v);
        }
        if let Some(v) = cli.quick {
            config.phases.quick = Some(v);
        }
        if let Some(v) = cli.sanitize {
            config.report.sanitize = Some(v);
        }
        if let Some(ref v) = cli.redact_level {
            config.report.redact_level = Some(v.clone());
        }
        if let Some(v) = cli.save_raw_results {
            config.report.save_raw_results = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

/// Cross-platform home directory resolution.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
