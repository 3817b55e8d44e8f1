//! Property checks for docstring dedenting, claim scoring and redaction.

use proptest::prelude::*;
use vibe_analysis::docs::extractor::{claim_confidence, extract_markdown};
use vibe_analysis::docs::ClaimType;
use vibe_analysis::parsers::python::clean_docstring;
use vibe_analysis::sanitize::{RedactLevel, Sanitizer, SystemIdentity};

fn claim_type() -> impl Strategy<Value = ClaimType> {
    prop::sample::select(ClaimType::ALL.to_vec())
}

fn high_sanitizer() -> Sanitizer {
    Sanitizer::with_identity(RedactLevel::High, SystemIdentity::default())
}

/// Text fragments that each trigger (or deliberately miss) a redaction rule.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,10}",
        ("[a-z]{3,8}", "[a-z]{3,8}").prop_map(|(u, d)| format!("{u}@{d}.com")),
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
        "[A-Za-z0-9]{20,30}".prop_map(|k| format!("api_key={k}")),
        "[A-Za-z0-9]{36}".prop_map(|t| format!("ghp_{t}")),
        "[0-9A-F]{16}".prop_map(|k| format!("AKIA{k}")),
        "[a-z]{3,8}".prop_map(|u| format!("/home/{u}/project")),
        "([0-9a-f]{2}:){5}[0-9a-f]{2}",
    ]
}

/// Leading indentation drawn from ASCII and multi-byte Unicode whitespace.
fn indent() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![' ', '\t', '\u{a0}', '\u{2003}', '\u{3000}', '\u{200a}', '\u{85}']),
        0..8,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn dedent_handles_any_whitespace_indent(
        lines in prop::collection::vec((indent(), "[a-z]{0,12}"), 1..8)
    ) {
        let doc: String = lines
            .iter()
            .map(|(pad, word)| format!("{pad}{word}"))
            .collect::<Vec<_>>()
            .join("\n");
        let cleaned = clean_docstring(&doc);
        for line in cleaned.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
        let visible = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        prop_assert_eq!(visible(&cleaned), visible(&doc));
    }

    #[test]
    fn confidence_stays_in_unit_interval(text in ".{0,200}", kind in claim_type()) {
        let confidence = claim_confidence(&text, kind);
        prop_assert!((0.0..=1.0).contains(&confidence), "confidence {confidence} for {text:?}");
    }

    #[test]
    fn extracted_claims_have_bounded_confidence(
        lines in prop::collection::vec(
            prop_oneof![
                "[a-z ]{0,40}",
                "[a-z]{2,10}".prop_map(|w| format!("It always supports {w} and might be fast")),
                "[a-z]{2,10}".prop_map(|w| format!("Returns {w} in 5 ms")),
            ],
            0..12,
        )
    ) {
        let doc = lines.join("\n");
        for claim in extract_markdown(&doc, "README.md") {
            prop_assert!((0.0..=1.0).contains(&claim.confidence));
        }
    }

    #[test]
    fn high_level_sanitizing_is_idempotent(
        fragments in prop::collection::vec(fragment(), 0..10)
    ) {
        let sanitizer = high_sanitizer();
        let text = fragments.join(" ");
        let once = sanitizer.sanitize_text(&text);
        let twice = sanitizer.sanitize_text(&once);
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn high_level_sanitizing_removes_emails(
        user in "[a-z]{3,8}",
        domain in "[a-z]{3,8}"
    ) {
        let email = format!("{user}@{domain}.com");
        let out = high_sanitizer().sanitize_text(&format!("contact {email} now"));
        prop_assert!(!out.contains(&email), "email survived: {out}");
    }
}
