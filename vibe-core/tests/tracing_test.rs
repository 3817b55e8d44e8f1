//! Tests for tracing initialization.

use std::sync::Mutex;

use vibe_core::tracing::setup::{init_tracing, init_tracing_with_default};

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_vibe_log_directive_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("VIBE_LOG", "vibe_analysis::testing=debug,vibe_analysis::git=warn");
    init_tracing();
    tracing::debug!(target: "vibe_analysis::testing", "visible at debug");
    std::env::remove_var("VIBE_LOG");
}

#[test]
fn test_init_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing_with_default("vibe=debug");
    init_tracing();
}

#[test]
fn test_garbage_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("VIBE_LOG", "[[not a filter");
    init_tracing();
    std::env::remove_var("VIBE_LOG");
}
