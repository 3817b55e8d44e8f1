//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::VibeEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
/// With no handlers registered, every `emit_*` is a loop over an empty Vec.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn VibeEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn VibeEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from receiving the event.
    fn emit<F: Fn(&dyn VibeEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Pipeline ----
    pub fn emit_pipeline_started(&self, event: &PipelineStartedEvent) {
        self.emit(|h| h.on_pipeline_started(event));
    }

    pub fn emit_pipeline_complete(&self, event: &PipelineCompleteEvent) {
        self.emit(|h| h.on_pipeline_complete(event));
    }

    // ---- Phases ----
    pub fn emit_phase_started(&self, event: &PhaseStartedEvent) {
        self.emit(|h| h.on_phase_started(event));
    }

    pub fn emit_phase_skipped(&self, event: &PhaseSkippedEvent) {
        self.emit(|h| h.on_phase_skipped(event));
    }

    pub fn emit_phase_complete(&self, event: &PhaseCompleteEvent) {
        self.emit(|h| h.on_phase_complete(event));
    }

    // ---- Tools ----
    pub fn emit_tool_started(&self, event: &ToolStartedEvent) {
        self.emit(|h| h.on_tool_started(event));
    }

    pub fn emit_tool_finished(&self, event: &ToolFinishedEvent) {
        self.emit(|h| h.on_tool_finished(event));
    }

    pub fn emit_tool_unavailable(&self, event: &ToolUnavailableEvent) {
        self.emit(|h| h.on_tool_unavailable(event));
    }

    // ---- Claims ----
    pub fn emit_claim_verified(&self, event: &ClaimVerifiedEvent) {
        self.emit(|h| h.on_claim_verified(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
