//! Raw results artifact.

use std::path::{Path, PathBuf};

use serde::Serialize;
use vibe_core::constants::RAW_RESULTS_FILE;
use vibe_core::errors::ReportError;

use crate::sanitize::Sanitizer;

/// Write `results` as pretty JSON to `dir/raw_results.json`, creating `dir`
/// if needed. With a sanitizer, every string and key is redacted first.
pub fn write_raw_results<T: Serialize>(
    dir: &Path,
    results: &T,
    sanitizer: Option<&Sanitizer>,
) -> Result<PathBuf, ReportError> {
    let value = match sanitizer {
        Some(s) => s.sanitize_results(results),
        None => serde_json::to_value(results),
    }
    .map_err(|e| ReportError::Serialization {
        message: e.to_string(),
    })?;
    let json = serde_json::to_string_pretty(&value).map_err(|e| ReportError::Serialization {
        message: e.to_string(),
    })?;

    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(RAW_RESULTS_FILE);
    std::fs::write(&path, json).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote raw results");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::{RedactLevel, SystemIdentity};

    #[derive(Serialize)]
    struct Sample {
        path: String,
        contact: String,
    }

    #[test]
    fn writes_sanitized_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let sanitizer = Sanitizer::with_identity(
            RedactLevel::High,
            SystemIdentity {
                home_dir: Some("/home/alice".into()),
                username: Some("alice".into()),
                hostname: None,
            },
        );
        let sample = Sample {
            path: "/home/alice/project/main.py".to_string(),
            contact: "alice@example.com".to_string(),
        };

        let path = write_raw_results(&out, &sample, Some(&sanitizer)).unwrap();
        assert_eq!(path, out.join(RAW_RESULTS_FILE));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("alice"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert!(parsed["contact"].as_str().is_some());
    }

    #[test]
    fn unsanitized_output_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let sample = Sample {
            path: "/srv/app".to_string(),
            contact: "ops@example.com".to_string(),
        };
        let path = write_raw_results(dir.path(), &sample, None).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("ops@example.com"));
    }
}
