//! Formal verification: Prusti, Kani, Miri, CBMC, Frama-C, OpenJML,
//! Mythril, Slither, CrossHair, Flow, staticcheck and gosec.

pub mod parse;
pub mod types;
pub mod verifier;

pub use types::{Counterexample, FormalFinding, FormalReport, FormalResults, WpStats};
pub use verifier::{available_tools, FormalVerifier, FORMAL_TOOLS, MAX_FILES_PER_TOOL};
