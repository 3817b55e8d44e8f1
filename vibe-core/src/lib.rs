//! # vibe-core
//!
//! Foundation crate for vibe-verifier: errors, configuration, pipeline
//! events, tracing setup and shared constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;

pub use config::VibeConfig;
pub use errors::{PipelineError, PipelineResult, VibeErrorCode};
