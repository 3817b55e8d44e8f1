//! Tests for the pipeline event dispatcher.

use std::sync::{Arc, Mutex};

use vibe_core::events::*;

#[derive(Default)]
struct RecordingHandler {
    phases: Mutex<Vec<Phase>>,
    tools: Mutex<Vec<String>>,
}

impl VibeEventHandler for RecordingHandler {
    fn on_phase_started(&self, event: &PhaseStartedEvent) {
        self.phases.lock().unwrap().push(event.phase);
    }

    fn on_tool_unavailable(&self, event: &ToolUnavailableEvent) {
        self.tools.lock().unwrap().push(event.tool.clone());
    }
}

struct PanickingHandler;

impl VibeEventHandler for PanickingHandler {
    fn on_phase_started(&self, _event: &PhaseStartedEvent) {
        panic!("handler failure");
    }
}

#[test]
fn test_empty_dispatcher_is_noop() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_phase_started(&PhaseStartedEvent { phase: Phase::Tests });
}

#[test]
fn test_events_reach_all_handlers() {
    let first = Arc::new(RecordingHandler::default());
    let second = Arc::new(RecordingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(first.clone());
    dispatcher.register(second.clone());

    dispatcher.emit_phase_started(&PhaseStartedEvent { phase: Phase::Documentation });
    dispatcher.emit_tool_unavailable(&ToolUnavailableEvent {
        tool: "bandit".into(),
        phase: Phase::StaticAnalysis,
    });

    for handler in [&first, &second] {
        assert_eq!(*handler.phases.lock().unwrap(), vec![Phase::Documentation]);
        assert_eq!(*handler.tools.lock().unwrap(), vec!["bandit".to_string()]);
    }
}

#[test]
fn test_panicking_handler_does_not_block_others() {
    let recorder = Arc::new(RecordingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(recorder.clone());

    dispatcher.emit_phase_started(&PhaseStartedEvent { phase: Phase::Complexity });
    assert_eq!(*recorder.phases.lock().unwrap(), vec![Phase::Complexity]);
}

#[test]
fn test_phase_order_and_titles() {
    assert_eq!(Phase::GitHistory.index(), 0);
    assert_eq!(Phase::Report.index(), 8);
    assert_eq!(Phase::ClaimVerification.to_string(), "Verifying documentation claims");
    let indices: Vec<usize> = Phase::ALL.iter().map(|p| p.index()).collect();
    assert_eq!(indices, (0..9).collect::<Vec<_>>());
}
