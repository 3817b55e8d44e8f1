//! Language detection from file extension.

use serde::{Deserialize, Serialize};

/// Languages recognised in a target repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
    C,
    CSharp,
    Go,
    Rust,
    Ruby,
    Php,
    Swift,
    Kotlin,
    Scala,
    R,
    Matlab,
    Julia,
    Lua,
    Perl,
    Shell,
    PowerShell,
    Solidity,
}

impl Language {
    /// Detect language from a file extension string (without the dot).
    pub fn from_extension(ext: Option<&str>) -> Option<Language> {
        let ext = ext?.to_ascii_lowercase();
        match ext.as_str() {
            "py" | "pyi" => Some(Language::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Language::TypeScript),
            "java" => Some(Language::Java),
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Some(Language::Cpp),
            "c" | "h" => Some(Language::C),
            "cs" => Some(Language::CSharp),
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            "rb" => Some(Language::Ruby),
            "php" => Some(Language::Php),
            "swift" => Some(Language::Swift),
            "kt" | "kts" => Some(Language::Kotlin),
            "scala" => Some(Language::Scala),
            "r" => Some(Language::R),
            "m" => Some(Language::Matlab),
            "jl" => Some(Language::Julia),
            "lua" => Some(Language::Lua),
            "pl" | "pm" => Some(Language::Perl),
            "sh" | "bash" => Some(Language::Shell),
            "ps1" => Some(Language::PowerShell),
            "sol" => Some(Language::Solidity),
            _ => None,
        }
    }

    /// Detect language from a path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Language> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::Scala => "Scala",
            Language::R => "R",
            Language::Matlab => "MATLAB",
            Language::Julia => "Julia",
            Language::Lua => "Lua",
            Language::Perl => "Perl",
            Language::Shell => "Shell",
            Language::PowerShell => "PowerShell",
            Language::Solidity => "Solidity",
        }
    }

    /// Key used in framework and formal-tool tables (`python`, `csharp`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Scala => "scala",
            Language::R => "r",
            Language::Matlab => "matlab",
            Language::Julia => "julia",
            Language::Lua => "lua",
            Language::Perl => "perl",
            Language::Shell => "shell",
            Language::PowerShell => "powershell",
            Language::Solidity => "solidity",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
