//! Event payload types for the verification pipeline.

use std::fmt;
use std::path::PathBuf;

/// The fixed sequence of pipeline phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    GitHistory,
    LanguageDetection,
    Documentation,
    Complexity,
    StaticAnalysis,
    FormalVerification,
    Tests,
    ClaimVerification,
    Report,
}

impl Phase {
    pub const ALL: [Phase; 9] = [
        Phase::GitHistory,
        Phase::LanguageDetection,
        Phase::Documentation,
        Phase::Complexity,
        Phase::StaticAnalysis,
        Phase::FormalVerification,
        Phase::Tests,
        Phase::ClaimVerification,
        Phase::Report,
    ];

    /// Zero-based position in the run.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::GitHistory => "Analyzing git history",
            Self::LanguageDetection => "Detecting languages",
            Self::Documentation => "Analyzing documentation",
            Self::Complexity => "Analyzing code complexity",
            Self::StaticAnalysis => "Running static analysis",
            Self::FormalVerification => "Running formal verification",
            Self::Tests => "Running tests",
            Self::ClaimVerification => "Verifying documentation claims",
            Self::Report => "Generating reports",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Payload for `on_pipeline_started`.
#[derive(Debug, Clone)]
pub struct PipelineStartedEvent {
    pub repo_path: PathBuf,
}

/// Payload for `on_phase_started`.
#[derive(Debug, Clone)]
pub struct PhaseStartedEvent {
    pub phase: Phase,
}

/// Payload for `on_phase_skipped`.
#[derive(Debug, Clone)]
pub struct PhaseSkippedEvent {
    pub phase: Phase,
    pub reason: String,
}

/// Payload for `on_phase_complete`.
#[derive(Debug, Clone)]
pub struct PhaseCompleteEvent {
    pub phase: Phase,
    pub duration_ms: u64,
    /// Human-readable summary lines, e.g. "Found 12 claims".
    pub summary: Vec<String>,
}

/// Payload for `on_tool_started`.
#[derive(Debug, Clone)]
pub struct ToolStartedEvent {
    pub tool: String,
    pub phase: Phase,
}

/// Payload for `on_tool_finished`.
#[derive(Debug, Clone)]
pub struct ToolFinishedEvent {
    pub tool: String,
    pub phase: Phase,
    pub success: bool,
    pub duration_ms: u64,
}

/// Payload for `on_tool_unavailable`.
#[derive(Debug, Clone)]
pub struct ToolUnavailableEvent {
    pub tool: String,
    pub phase: Phase,
}

/// Payload for `on_claim_verified`.
#[derive(Debug, Clone)]
pub struct ClaimVerifiedEvent {
    pub claim: String,
    pub status: String,
    pub confidence: f64,
}

/// Payload for `on_pipeline_complete`.
#[derive(Debug, Clone)]
pub struct PipelineCompleteEvent {
    pub duration_ms: u64,
    pub exit_code: i32,
    pub error_count: usize,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
