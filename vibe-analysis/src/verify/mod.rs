//! Claim verification against collected evidence.

pub mod claim_verifier;
pub mod evidence;

pub use claim_verifier::{
    verify_claim, ClaimVerification, ClaimVerifier, VerificationOutcome, VerificationStatus,
    VerificationSummary,
};
pub use evidence::{Evidence, TestEvidence};
