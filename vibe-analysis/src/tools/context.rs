//! Shared plumbing for invoking tools from an analysis phase.

use std::time::Duration;

use vibe_core::config::ToolConfig;
use vibe_core::events::{
    EventDispatcher, Phase, ToolFinishedEvent, ToolStartedEvent, ToolUnavailableEvent,
};

use super::runner::ToolRunner;
use super::types::{ToolInvocation, ToolOutput, ToolStatus};

/// Borrowed runner, event sink, and tool settings for one phase.
pub struct ToolContext<'a> {
    pub runner: &'a dyn ToolRunner,
    pub events: &'a EventDispatcher,
    pub config: &'a ToolConfig,
    pub phase: Phase,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        runner: &'a dyn ToolRunner,
        events: &'a EventDispatcher,
        config: &'a ToolConfig,
        phase: Phase,
    ) -> Self {
        Self {
            runner,
            events,
            config,
            phase,
        }
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.config.effective_timeout_secs())
    }

    /// Whether `program` is enabled and on PATH.
    pub fn available(&self, program: &str) -> bool {
        !self.config.is_disabled(program) && self.runner.is_available(program)
    }

    /// Run a tool, emitting lifecycle events. Unavailable or failed runs are
    /// returned as the `ToolStatus` to record; nothing here is fatal.
    pub fn invoke(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolStatus> {
        let program = invocation.program.as_str();
        if !self.available(program) {
            tracing::debug!(tool = program, "tool unavailable");
            self.events.emit_tool_unavailable(&ToolUnavailableEvent {
                tool: program.to_string(),
                phase: self.phase,
            });
            return Err(ToolStatus::Unavailable);
        }

        self.events.emit_tool_started(&ToolStartedEvent {
            tool: program.to_string(),
            phase: self.phase,
        });
        let result = self.runner.run(invocation);
        let (success, duration_ms) = match &result {
            Ok(out) => (true, out.duration_ms),
            Err(_) => (false, 0),
        };
        self.events.emit_tool_finished(&ToolFinishedEvent {
            tool: program.to_string(),
            phase: self.phase,
            success,
            duration_ms,
        });

        result.map_err(|e| {
            tracing::warn!(tool = program, error = %e, "tool run failed");
            ToolStatus::Failed {
                error: e.to_string(),
            }
        })
    }

    /// Invocation preset with the configured default timeout.
    pub fn command(&self, program: &str, cwd: &std::path::Path) -> ToolInvocation {
        ToolInvocation::new(program, cwd).timeout(self.default_timeout())
    }
}
