//! Output parsers for formal verification tools.

use super::types::{Counterexample, WpStats};

/// Lines mentioning a failed verification or an assertion.
pub fn parse_cbmc(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|l| l.contains("VERIFICATION FAILED") || l.contains("assertion"))
        .map(|l| l.trim().to_string())
        .collect()
}

pub fn parse_frama_c(output: &str) -> WpStats {
    let proved = output.matches("Proved").count();
    let total = output.matches("Goal").count();
    WpStats {
        proved,
        total,
        percentage: if total > 0 {
            proved as f64 / total as f64 * 100.0
        } else {
            0.0
        },
    }
}

pub fn parse_openjml(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|l| l.contains("warning:") || l.contains("error:"))
        .map(|l| l.trim().to_string())
        .collect()
}

/// Each "Counterexample found" line starts a new example; following
/// non-empty lines are its inputs.
pub fn parse_crosshair(output: &str) -> Vec<Counterexample> {
    let mut examples = Vec::new();
    let mut current: Option<Counterexample> = None;
    for line in output.lines() {
        if line.contains("Counterexample found") {
            if let Some(done) = current.take() {
                examples.push(done);
            }
            current = Some(Counterexample {
                description: line.to_string(),
                inputs: Vec::new(),
            });
        } else if let Some(example) = current.as_mut() {
            if !line.trim().is_empty() {
                example.inputs.push(line.trim().to_string());
            }
        }
    }
    examples.extend(current);
    examples
}

/// JSON Lines, skipping lines that are not JSON.
pub fn parse_json_lines(output: &str) -> Vec<serde_json::Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frama_c_counts_goals() {
        let stats = parse_frama_c("[wp] Goal a : Proved\n[wp] Goal b : Unknown\n");
        assert_eq!(stats.proved, 1);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.percentage, 50.0);
        assert_eq!(parse_frama_c("").percentage, 0.0);
    }

    #[test]
    fn crosshair_groups_inputs() {
        let out = "m.py:3: error: Counterexample found: f(0)\n  x = 0\n\nm.py:9: error: Counterexample found: g('')\n";
        let examples = parse_crosshair(out);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].inputs, vec!["x = 0"]);
        assert!(examples[1].inputs.is_empty());
    }

    #[test]
    fn cbmc_and_openjml_filters() {
        assert_eq!(parse_cbmc("** 1 of 3 failed\nVERIFICATION FAILED\n").len(), 1);
        assert_eq!(parse_openjml("A.java:3: warning: x\nok\nB.java:1: error: y\n").len(), 2);
    }

    #[test]
    fn json_lines_skip_noise() {
        let values = parse_json_lines("{\"code\":\"SA1000\"}\nnoise\n{\"code\":\"S1002\"}\n");
        assert_eq!(values.len(), 2);
    }
}
