//! Regexes for sensitive data in report text.

use std::sync::LazyLock;

use regex::Regex;

macro_rules! sensitive_pattern {
    ($name:ident, $re:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($re).ok());
    };
}

sensitive_pattern!(RE_USER_PATH, r"(?i)/(?:home|Users)/([^/\s]+)/");
sensitive_pattern!(RE_WINDOWS_USER_PATH, r"(?i)C:\\Users\\([^\\\s]+)\\");
sensitive_pattern!(RE_EMAIL, r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b");
sensitive_pattern!(RE_IPV4, r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b");
sensitive_pattern!(RE_MAC, r"\b(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}\b");
sensitive_pattern!(
    RE_API_KEY,
    r#"(?i)["']?(?:api[_-]?key|token|secret)["']?\s*[:=]\s*["']?([a-zA-Z0-9_\-]{10,})["']?"#
);
sensitive_pattern!(
    RE_STANDALONE_SECRET,
    r"\b(sk-[a-zA-Z0-9_\-]{10,}|pk_[a-zA-Z0-9_\-]{10,}|[a-zA-Z0-9]{32,})\b"
);
sensitive_pattern!(RE_SSH_KEY, r"ssh-(?:rsa|dss|ed25519) [A-Za-z0-9+/=]+");
sensitive_pattern!(RE_AWS_ACCESS, r"AKIA[0-9A-Z]{16}");
sensitive_pattern!(
    RE_AWS_SECRET,
    r"(?i)(?:aws_secret_access_key|aws_secret_key|secret_key)\s*=\s*[A-Za-z0-9/+=]{40}"
);
sensitive_pattern!(RE_GITHUB_TOKEN, r"gh[ps]_[a-zA-Z0-9]{36}|github_pat_[a-zA-Z0-9_]+");
sensitive_pattern!(RE_URL_CREDENTIALS, r"(?:https?|ftp)://[^:\s]+:[^@\s]+@[^/\s]+");
sensitive_pattern!(RE_URL_USERINFO, r"://[^@]+@");
sensitive_pattern!(
    RE_HOSTNAME_ASSIGNMENT,
    r#"(?i)(?:hostname|machine|computer)["']?\s*[:=]\s*["']?([a-zA-Z0-9_\-\.]+)["']?"#
);

pub fn compiled(pattern: &'static LazyLock<Option<Regex>>) -> Option<&'static Regex> {
    LazyLock::force(pattern).as_ref()
}
