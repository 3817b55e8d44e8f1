//! Console progress: phase banners and per-phase summary lines.

use std::io::Write;
use std::sync::Mutex;

use vibe_core::events::{
    ErrorEvent, Phase, PhaseCompleteEvent, PhaseSkippedEvent, PhaseStartedEvent,
    PipelineCompleteEvent, PipelineStartedEvent, ToolUnavailableEvent, VibeEventHandler,
};

pub struct ConsoleProgress {
    out: Mutex<Box<dyn Write + Send>>,
    verbose: bool,
}

impl ConsoleProgress {
    pub fn new(out: Box<dyn Write + Send>, verbose: bool) -> Self {
        Self {
            out: Mutex::new(out),
            verbose,
        }
    }

    pub fn stderr(verbose: bool) -> Self {
        Self::new(Box::new(std::io::stderr()), verbose)
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{text}");
        }
    }
}

fn banner(phase: Phase) -> String {
    format!("Phase {}: {}...", phase.index() + 1, phase.title())
}

impl VibeEventHandler for ConsoleProgress {
    fn on_pipeline_started(&self, event: &PipelineStartedEvent) {
        self.line(&format!("Analyzing repository: {}", event.repo_path.display()));
    }

    fn on_phase_started(&self, event: &PhaseStartedEvent) {
        self.line(&banner(event.phase));
    }

    fn on_phase_skipped(&self, event: &PhaseSkippedEvent) {
        self.line(&format!("{} skipped ({})", banner(event.phase), event.reason));
    }

    fn on_phase_complete(&self, event: &PhaseCompleteEvent) {
        for summary in &event.summary {
            self.line(&format!("  {summary}"));
        }
        if self.verbose {
            self.line(&format!("  done in {} ms", event.duration_ms));
        }
    }

    fn on_tool_unavailable(&self, event: &ToolUnavailableEvent) {
        if self.verbose {
            self.line(&format!("  {} not installed, skipping", event.tool));
        }
    }

    fn on_pipeline_complete(&self, event: &PipelineCompleteEvent) {
        self.line(&format!("Analysis complete in {:.1}s", event.duration_ms as f64 / 1000.0));
        if event.error_count > 0 {
            self.line(&format!("{} non-fatal error(s) during analysis", event.error_count));
        }
    }

    fn on_error(&self, event: &ErrorEvent) {
        self.line(&format!("  error [{}]: {}", event.error_code, event.message));
    }
}
