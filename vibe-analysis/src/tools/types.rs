//! Tool invocation and outcome types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

/// A single external command to run.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
    pub timeout: Duration,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
            timeout: Duration::from_secs(300),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `program arg1 arg2`, for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Outcome of a tool step, embedded in every per-tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolStatus {
    Completed,
    Failed { error: String },
    Unavailable,
}

impl ToolStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A tool's status plus whatever it produced, serialized flat:
/// `{"status": "completed", ...data}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolReport<T> {
    #[serde(flatten)]
    pub status: ToolStatus,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Default> ToolReport<T> {
    pub fn completed(data: T) -> Self {
        Self {
            status: ToolStatus::Completed,
            data,
        }
    }

    /// A report with no data, for tools that did not complete.
    pub fn from_status(status: ToolStatus) -> Self {
        Self {
            status,
            data: T::default(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::from_status(ToolStatus::Failed {
            error: error.into(),
        })
    }
}

/// Keep the last `max_chars` characters of `s`.
pub fn truncate_tail(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    s.chars().skip(count - max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_tail_keeps_end() {
        assert_eq!(truncate_tail("abcdef", 3), "def");
        assert_eq!(truncate_tail("abc", 10), "abc");
        assert_eq!(truncate_tail("ééé", 2), "éé");
    }

    #[test]
    fn status_serializes_with_tag() {
        let failed = serde_json::to_value(ToolStatus::Failed { error: "boom".into() }).unwrap();
        assert_eq!(failed["status"], "failed");
        assert_eq!(failed["error"], "boom");
        let done = serde_json::to_value(ToolStatus::Completed).unwrap();
        assert_eq!(done, serde_json::json!({"status": "completed"}));
    }

    #[derive(Debug, Default, Serialize)]
    struct Counts {
        total_issues: usize,
    }

    #[test]
    fn report_flattens_status_and_data() {
        let report = ToolReport::completed(Counts { total_issues: 3 });
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({"status": "completed", "total_issues": 3})
        );
        let missing: ToolReport<Counts> = ToolReport::from_status(ToolStatus::Unavailable);
        assert_eq!(serde_json::to_value(&missing).unwrap()["status"], "unavailable");
    }
}
