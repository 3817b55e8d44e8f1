//! Shared helpers for vibe-analysis integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use vibe_analysis::tools::{ToolInvocation, ToolOutput, ToolRunner};
use vibe_core::errors::ToolError;
use vibe_core::events::*;

/// A `ToolRunner` that only knows the programs it was scripted with.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: Vec<(String, ToolOutput)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    /// No tool is installed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, program: &str, exit_code: i32, stdout: &str) -> Self {
        self.scripts.push((
            program.to_string(),
            ToolOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: String::new(),
                duration_ms: 1,
            },
        ));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolRunner for ScriptedRunner {
    fn is_available(&self, program: &str) -> bool {
        self.scripts.iter().any(|(p, _)| p == program)
    }

    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        self.calls.lock().unwrap().push(invocation.display());
        self.scripts
            .iter()
            .find(|(p, _)| *p == invocation.program)
            .map(|(_, out)| out.clone())
            .ok_or_else(|| ToolError::NotFound {
                program: invocation.program.clone(),
            })
    }
}

/// Records the phase lifecycle as `started:<phase>`, `complete:<phase>`
/// and `skipped:<phase>` entries.
#[derive(Default)]
pub struct PhaseRecorder {
    pub log: Mutex<Vec<String>>,
    pub summaries: Mutex<Vec<(Phase, Vec<String>)>>,
    pub errors: Mutex<Vec<String>>,
    pub exit_codes: Mutex<Vec<i32>>,
}

impl PhaseRecorder {
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn summary_for(&self, phase: Phase) -> Vec<String> {
        self.summaries
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, lines)| lines.clone())
            .unwrap_or_default()
    }
}

impl VibeEventHandler for PhaseRecorder {
    fn on_phase_started(&self, event: &PhaseStartedEvent) {
        self.log.lock().unwrap().push(format!("started:{:?}", event.phase));
    }

    fn on_phase_skipped(&self, event: &PhaseSkippedEvent) {
        self.log.lock().unwrap().push(format!("skipped:{:?}", event.phase));
    }

    fn on_phase_complete(&self, event: &PhaseCompleteEvent) {
        self.log.lock().unwrap().push(format!("complete:{:?}", event.phase));
        self.summaries
            .lock()
            .unwrap()
            .push((event.phase, event.summary.clone()));
    }

    fn on_pipeline_complete(&self, event: &PipelineCompleteEvent) {
        self.exit_codes.lock().unwrap().push(event.exit_code);
    }

    fn on_error(&self, event: &ErrorEvent) {
        self.errors.lock().unwrap().push(event.error_code.clone());
    }
}

pub fn recorder() -> (Arc<PhaseRecorder>, EventDispatcher) {
    let recorder = Arc::new(PhaseRecorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());
    (recorder, dispatcher)
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A small Python project with a README making one checkable and one
/// unbacked API claim.
pub fn python_project(root: &Path) {
    write(
        root,
        "README.md",
        "# Greeter\n\nThe greet function returns a friendly greeting.\n\nThe client returns zzqx payloads.\n",
    );
    write(
        root,
        "greeter.py",
        "def greet(name):\n    \"\"\"Say hello.\"\"\"\n    if name:\n        return f\"Hello, {name}\"\n    return \"Hello\"\n",
    );
    write(
        root,
        "test_greeter.py",
        "from greeter import greet\n\n\ndef test_greet():\n    assert greet(\"a\") == \"Hello, a\"\n",
    );
}
