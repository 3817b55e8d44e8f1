//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vibe_core::config::vibe_config::CliOverrides;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RedactLevelArg {
    Low,
    Medium,
    High,
}

impl RedactLevelArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Verify the claims a repository's documentation makes against its code,
/// tests and tooling.
#[derive(Parser, Debug)]
#[command(name = "vibe-verifier")]
#[command(version, about, long_about = None)]
#[command(after_help = "Environment:\n  VIBE_LOG   Log filter override, e.g. vibe_analysis::testing=debug")]
pub struct Cli {
    /// Repository to analyze
    pub repo: PathBuf,

    /// Directory for raw results
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Additional TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not run test suites
    #[arg(long)]
    pub skip_tests: bool,

    /// Do not run formal verification tools
    #[arg(long)]
    pub skip_verification: bool,

    /// Skip formal verification, tests and file ownership analysis
    #[arg(long)]
    pub quick: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write results without redaction
    #[arg(long)]
    pub no_sanitize: bool,

    /// How aggressively to redact personal data
    #[arg(long, value_enum)]
    pub redact_level: Option<RedactLevelArg>,

    /// Save sanitized raw results to the output directory
    #[arg(long)]
    pub save_raw_results: bool,
}

impl Cli {
    /// Flags that were given become overrides; absent flags leave the
    /// config file values alone.
    pub fn to_overrides(&self) -> CliOverrides {
        let set = |flag: bool| flag.then_some(true);
        CliOverrides {
            output_dir: self.output_dir.clone(),
            format: self.format.map(|f| f.as_str().to_string()),
            skip_tests: set(self.skip_tests),
            skip_verification: set(self.skip_verification),
            quick: set(self.quick),
            sanitize: self.no_sanitize.then_some(false),
            redact_level: self.redact_level.map(|l| l.as_str().to_string()),
            save_raw_results: set(self.save_raw_results),
        }
    }

    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "vibe=debug"
        } else {
            "vibe=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vibe-verifier").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_bare_invocation_has_no_overrides() {
        let cli = parse(&["repo"]);
        assert_eq!(cli.repo, PathBuf::from("repo"));
        let overrides = cli.to_overrides();
        assert!(overrides.output_dir.is_none());
        assert!(overrides.format.is_none());
        assert!(overrides.skip_tests.is_none());
        assert!(overrides.quick.is_none());
        assert!(overrides.sanitize.is_none());
        assert!(overrides.save_raw_results.is_none());
        assert_eq!(cli.log_directive(), "vibe=info");
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "repo",
            "-o",
            "out",
            "-f",
            "json",
            "--config",
            "extra.toml",
            "--skip-tests",
            "--skip-verification",
            "--quick",
            "-v",
            "--no-sanitize",
            "--redact-level",
            "high",
            "--save-raw-results",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("extra.toml")));
        assert_eq!(cli.log_directive(), "vibe=debug");

        let overrides = cli.to_overrides();
        assert_eq!(overrides.output_dir, Some(PathBuf::from("out")));
        assert_eq!(overrides.format.as_deref(), Some("json"));
        assert_eq!(overrides.skip_tests, Some(true));
        assert_eq!(overrides.skip_verification, Some(true));
        assert_eq!(overrides.quick, Some(true));
        assert_eq!(overrides.sanitize, Some(false));
        assert_eq!(overrides.redact_level.as_deref(), Some("high"));
        assert_eq!(overrides.save_raw_results, Some(true));
    }

    #[test]
    fn test_rejects_unknown_values() {
        let bad_format = ["vibe-verifier", "repo", "--format", "html"];
        assert!(Cli::try_parse_from(bad_format).is_err());
        let bad_level = ["vibe-verifier", "repo", "--redact-level", "extreme"];
        assert!(Cli::try_parse_from(bad_level).is_err());
    }

    #[test]
    fn test_repo_is_required() {
        assert!(Cli::try_parse_from(["vibe-verifier"]).is_err());
    }
}
