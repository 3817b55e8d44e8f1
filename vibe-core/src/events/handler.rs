//! VibeEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing pipeline progress.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about.
pub trait VibeEventHandler: Send + Sync {
    // ---- Pipeline ----
    fn on_pipeline_started(&self, _event: &PipelineStartedEvent) {}
    fn on_pipeline_complete(&self, _event: &PipelineCompleteEvent) {}

    // ---- Phases ----
    fn on_phase_started(&self, _event: &PhaseStartedEvent) {}
    fn on_phase_skipped(&self, _event: &PhaseSkippedEvent) {}
    fn on_phase_complete(&self, _event: &PhaseCompleteEvent) {}

    // ---- Tools ----
    fn on_tool_started(&self, _event: &ToolStartedEvent) {}
    fn on_tool_finished(&self, _event: &ToolFinishedEvent) {}
    fn on_tool_unavailable(&self, _event: &ToolUnavailableEvent) {}

    // ---- Claims ----
    fn on_claim_verified(&self, _event: &ClaimVerifiedEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
