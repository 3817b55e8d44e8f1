//! Shared constants.

/// Version reported in raw results and the CLI banner.
pub const VIBE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project-level config file, looked up in the target repository root.
pub const PROJECT_CONFIG_FILE: &str = "vibe-verifier.toml";

/// User-level config directory under `$HOME`.
pub const USER_CONFIG_DIR: &str = ".vibe-verifier";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "VIBE_LOG";

/// Directories never descended into when walking a target repository.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "venv",
    ".venv",
    "env",
    "__pycache__",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    "target",
    "dist",
    "build",
];

/// Name of the sanitized raw results artifact.
pub const RAW_RESULTS_FILE: &str = "raw_results.json";
