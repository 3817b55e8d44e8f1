//! Claim verification: correlate each claim with the evidence collected by
//! the analysis phases.

use serde::Serialize;
use vibe_core::events::{ClaimVerifiedEvent, EventDispatcher};

use super::evidence::Evidence;
use crate::docs::{Claim, ClaimType, VerificationMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Failed,
    Inconclusive,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Failed => "failed",
            Self::Inconclusive => "inconclusive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationOutcome {
    pub claim: String,
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    pub status: VerificationStatus,
    pub evidence: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerificationSummary {
    pub total_claims: usize,
    pub verified: usize,
    pub failed: usize,
    pub inconclusive: usize,
    /// Percentage of claims verified.
    pub verification_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClaimVerification {
    pub verified: Vec<VerificationOutcome>,
    pub failed: Vec<VerificationOutcome>,
    pub inconclusive: Vec<VerificationOutcome>,
    pub summary: VerificationSummary,
}

#[derive(Default)]
pub struct ClaimVerifier<'a> {
    events: Option<&'a EventDispatcher>,
}

impl<'a> ClaimVerifier<'a> {
    pub fn new() -> Self {
        Self { events: None }
    }

    /// Emit a `claim_verified` event per claim.
    pub fn with_events(events: &'a EventDispatcher) -> Self {
        Self {
            events: Some(events),
        }
    }

    pub fn verify_claims(&self, claims: &[Claim], evidence: &Evidence) -> ClaimVerification {
        let mut results = ClaimVerification::default();
        for claim in claims {
            let outcome = verify_claim(claim, evidence);
            if let Some(events) = self.events {
                events.emit_claim_verified(&ClaimVerifiedEvent {
                    claim: outcome.claim.clone(),
                    status: outcome.status.as_str().to_string(),
                    confidence: outcome.confidence,
                });
            }
            match outcome.status {
                VerificationStatus::Verified => results.verified.push(outcome),
                VerificationStatus::Failed => results.failed.push(outcome),
                VerificationStatus::Inconclusive => results.inconclusive.push(outcome),
            }
        }

        let total = claims.len();
        results.summary = VerificationSummary {
            total_claims: total,
            verified: results.verified.len(),
            failed: results.failed.len(),
            inconclusive: results.inconclusive.len(),
            verification_rate: if total > 0 {
                results.verified.len() as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        };
        tracing::info!(
            total,
            verified = results.summary.verified,
            failed = results.summary.failed,
            "claims verified"
        );
        results
    }
}

fn outcome(claim: &Claim, status: VerificationStatus, confidence: f64, evidence: String) -> VerificationOutcome {
    VerificationOutcome {
        claim: claim.text.clone(),
        claim_type: claim.claim_type,
        status,
        evidence: vec![evidence],
        confidence,
    }
}

/// Dispatch on the claim's verification method.
pub fn verify_claim(claim: &Claim, evidence: &Evidence) -> VerificationOutcome {
    match claim.verification_method {
        VerificationMethod::UnitTest => verify_api(claim),
        VerificationMethod::Benchmark => verify_performance(claim, evidence),
        VerificationMethod::SecurityTest => verify_security(claim, evidence),
        VerificationMethod::IntegrationTest | VerificationMethod::PropertyTest => {
            verify_general(claim, evidence)
        }
    }
}

fn verify_api(claim: &Claim) -> VerificationOutcome {
    if claim.related_code.is_empty() {
        outcome(
            claim,
            VerificationStatus::Failed,
            0.9,
            "No implementation found for claimed API".to_string(),
        )
    } else {
        outcome(
            claim,
            VerificationStatus::Verified,
            0.8,
            format!("Found implementation in {} files", claim.related_code.len()),
        )
    }
}

fn verify_performance(claim: &Claim, evidence: &Evidence) -> VerificationOutcome {
    match evidence.benchmark_files.first() {
        Some(bench) => outcome(
            claim,
            VerificationStatus::Inconclusive,
            0.5,
            format!("Found potential benchmark: {bench}"),
        ),
        None => outcome(
            claim,
            VerificationStatus::Inconclusive,
            0.3,
            "No benchmarks found to verify performance claim".to_string(),
        ),
    }
}

fn verify_security(claim: &Claim, evidence: &Evidence) -> VerificationOutcome {
    if evidence.findings_touch(&claim.related_code) {
        return outcome(
            claim,
            VerificationStatus::Failed,
            0.7,
            "Security findings reported in related code".to_string(),
        );
    }
    if evidence.security_scan_completed
        && evidence.security_findings == 0
        && !claim.related_code.is_empty()
    {
        return outcome(
            claim,
            VerificationStatus::Verified,
            0.6,
            format!(
                "Security scan found no issues; related code in {} files",
                claim.related_code.len()
            ),
        );
    }
    outcome(
        claim,
        VerificationStatus::Inconclusive,
        0.4,
        "Security verification requires dedicated security analysis".to_string(),
    )
}

fn verify_general(claim: &Claim, evidence: &Evidence) -> VerificationOutcome {
    if claim.related_code.is_empty() {
        return outcome(
            claim,
            VerificationStatus::Inconclusive,
            0.2,
            "Unable to automatically verify this claim".to_string(),
        );
    }
    let files = claim.related_code.len();
    match evidence.tests {
        Some(tests) if tests.all_passed() => outcome(
            claim,
            VerificationStatus::Verified,
            0.6,
            format!("Found related code in {files} files; {} tests passed", tests.total),
        ),
        _ => outcome(
            claim,
            VerificationStatus::Inconclusive,
            0.5,
            format!("Found related code in {files} files"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::TestEvidence;

    fn claim(claim_type: ClaimType, related: &[&str]) -> Claim {
        let mut c = Claim::new("does things", "README.md", 1, claim_type, 0.5, "General");
        for r in related {
            c.add_related(r);
        }
        c
    }

    #[test]
    fn api_claims_depend_on_related_code() {
        let ev = Evidence::default();
        let ok = verify_claim(&claim(ClaimType::Api, &["a.py", "b.py"]), &ev);
        assert_eq!(ok.status, VerificationStatus::Verified);
        assert_eq!(ok.confidence, 0.8);
        assert_eq!(ok.evidence, vec!["Found implementation in 2 files"]);
        let missing = verify_claim(&claim(ClaimType::Api, &[]), &ev);
        assert_eq!(missing.status, VerificationStatus::Failed);
        assert_eq!(missing.confidence, 0.9);
    }

    #[test]
    fn performance_claims_are_never_verified() {
        let mut ev = Evidence::default();
        assert_eq!(verify_claim(&claim(ClaimType::Performance, &[]), &ev).confidence, 0.3);
        ev.benchmark_files.push("bench/run.py".into());
        let with_bench = verify_claim(&claim(ClaimType::Performance, &[]), &ev);
        assert_eq!(with_bench.status, VerificationStatus::Inconclusive);
        assert_eq!(with_bench.confidence, 0.5);
    }

    #[test]
    fn security_claims_use_scan_results() {
        let mut ev = Evidence {
            security_scan_completed: true,
            ..Default::default()
        };
        let c = claim(ClaimType::Security, &["src/auth.py"]);
        assert_eq!(verify_claim(&c, &ev).status, VerificationStatus::Verified);

        ev.security_findings = 1;
        ev.security_finding_files.insert("/repo/src/auth.py".into());
        let failed = verify_claim(&c, &ev);
        assert_eq!(failed.status, VerificationStatus::Failed);
        assert_eq!(failed.confidence, 0.7);

        ev.security_finding_files.clear();
        ev.security_finding_files.insert("other.py".into());
        assert_eq!(verify_claim(&c, &ev).confidence, 0.4);
    }

    #[test]
    fn general_claims_need_passing_tests() {
        let mut ev = Evidence::default();
        let c = claim(ClaimType::Feature, &["src/app.py"]);
        assert_eq!(verify_claim(&c, &ev).confidence, 0.5);
        ev.tests = Some(TestEvidence { total: 4, failed: 0 });
        assert_eq!(verify_claim(&c, &ev).status, VerificationStatus::Verified);
        ev.tests = Some(TestEvidence { total: 4, failed: 1 });
        assert_eq!(verify_claim(&c, &ev).status, VerificationStatus::Inconclusive);
        assert_eq!(verify_claim(&claim(ClaimType::Behavior, &[]), &ev).confidence, 0.2);
    }

    #[test]
    fn summary_rate_is_a_percentage() {
        let claims = vec![claim(ClaimType::Api, &["a.py"]), claim(ClaimType::Api, &[])];
        let result = ClaimVerifier::new().verify_claims(&claims, &Evidence::default());
        assert_eq!(result.summary.total_claims, 2);
        assert_eq!(result.summary.verified, 1);
        assert_eq!(result.summary.failed, 1);
        assert_eq!(result.summary.verification_rate, 50.0);
    }
}
