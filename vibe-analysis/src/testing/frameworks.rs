//! Known test frameworks per language.

use crate::scanner::Language;

/// How to recognise and run one test framework.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkSpec {
    /// Table key, e.g. `python`.
    pub language: &'static str,
    pub name: &'static str,
    /// Globs (containing `*`) match any file in the repo; plain entries
    /// are paths relative to the root.
    pub indicators: &'static [&'static str],
    /// `{output}` is replaced with a temp file path.
    pub command: &'static [&'static str],
    pub config_files: &'static [&'static str],
}

/// Placeholder in `command` for the structured-output file.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

macro_rules! framework {
    ($lang:literal, $name:literal, [$($ind:literal),*], [$($cmd:literal),*], [$($cfg:literal),*]) => {
        FrameworkSpec {
            language: $lang,
            name: $name,
            indicators: &[$($ind),*],
            command: &[$($cmd),*],
            config_files: &[$($cfg),*],
        }
    };
}

pub static FRAMEWORKS: &[FrameworkSpec] = &[
    framework!("python", "pytest",
        ["pytest.ini", "conftest.py", "test_*.py", "*_test.py"],
        ["pytest", "--json-report", "--json-report-file={output}", "-v"],
        ["pytest.ini", "setup.cfg", "tox.ini", "pyproject.toml"]),
    framework!("python", "unittest",
        ["test*.py"],
        ["python", "-m", "unittest", "discover", "-v"],
        []),
    framework!("python", "nose",
        ["nose.cfg", ".noserc"],
        ["nosetests", "--with-json", "--json-file={output}"],
        ["nose.cfg", ".noserc"]),
    framework!("javascript", "jest",
        ["jest.config.js", "jest.config.json"],
        ["npm", "test", "--", "--json", "--outputFile={output}"],
        ["jest.config.js", "jest.config.json"]),
    framework!("javascript", "mocha",
        ["mocha.opts", ".mocharc.js", ".mocharc.json"],
        ["npm", "test", "--", "--reporter", "json", "--reporter-options", "output={output}"],
        ["mocha.opts", ".mocharc.js", ".mocharc.json"]),
    framework!("javascript", "jasmine",
        ["jasmine.json", "spec/"],
        ["npm", "test"],
        ["jasmine.json"]),
    framework!("javascript", "vitest",
        ["vitest.config.js", "vitest.config.ts"],
        ["npm", "test", "--", "--reporter=json", "--outputFile={output}"],
        ["vitest.config.js", "vitest.config.ts"]),
    framework!("typescript", "jest",
        ["jest.config.ts"],
        ["npm", "test", "--", "--json", "--outputFile={output}"],
        ["jest.config.ts"]),
    framework!("typescript", "vitest",
        ["vitest.config.ts"],
        ["npm", "test", "--", "--reporter=json", "--outputFile={output}"],
        ["vitest.config.ts"]),
    framework!("java", "junit",
        ["pom.xml", "src/test/java/"],
        ["mvn", "test", "-Dmaven.test.failure.ignore=true"],
        ["pom.xml"]),
    framework!("java", "gradle",
        ["build.gradle", "build.gradle.kts"],
        ["gradle", "test", "--continue"],
        ["build.gradle", "build.gradle.kts"]),
    framework!("java", "testng",
        ["testng.xml"],
        ["mvn", "test", "-Dtestng.dtd.http=true"],
        ["testng.xml"]),
    framework!("csharp", "nunit",
        ["*.csproj"],
        ["dotnet", "test", "--logger:trx"],
        ["*.csproj"]),
    framework!("csharp", "xunit",
        ["xunit.runner.json"],
        ["dotnet", "test", "--logger:trx"],
        ["xunit.runner.json"]),
    framework!("go", "gotest",
        ["*_test.go", "go.mod"],
        ["go", "test", "-json", "./..."],
        ["go.mod"]),
    framework!("go", "ginkgo",
        ["*_suite_test.go"],
        ["ginkgo", "-r", "--json-report={output}"],
        []),
    framework!("rust", "cargo",
        ["Cargo.toml"],
        ["cargo", "test"],
        ["Cargo.toml"]),
    framework!("ruby", "rspec",
        ["spec/", ".rspec", "spec_helper.rb"],
        ["rspec", "--format", "json", "--out", "{output}"],
        [".rspec"]),
    framework!("ruby", "minitest",
        ["test_helper.rb"],
        ["rake", "test"],
        ["Rakefile"]),
    framework!("php", "phpunit",
        ["phpunit.xml", "phpunit.xml.dist"],
        ["phpunit", "--log-junit", "{output}"],
        ["phpunit.xml", "phpunit.xml.dist"]),
    framework!("php", "pest",
        ["pest.php"],
        ["pest", "--compact"],
        []),
    framework!("cpp", "gtest",
        ["CMakeLists.txt"],
        ["ctest", "--output-on-failure", "-T", "Test"],
        ["CMakeLists.txt"]),
    framework!("swift", "xctest",
        ["Package.swift", "Tests/"],
        ["swift", "test"],
        ["Package.swift"]),
    framework!("kotlin", "junit",
        ["build.gradle.kts", "src/test/kotlin/"],
        ["gradle", "test"],
        ["build.gradle.kts"]),
    framework!("scala", "scalatest",
        ["build.sbt", "src/test/scala/"],
        ["sbt", "test"],
        ["build.sbt"]),
];

/// Source languages whose presence enables a table language.
pub fn source_languages(table_language: &str) -> &'static [Language] {
    match table_language {
        "python" => &[Language::Python],
        "javascript" => &[Language::JavaScript],
        "typescript" => &[Language::TypeScript],
        "java" => &[Language::Java],
        "csharp" => &[Language::CSharp],
        "go" => &[Language::Go],
        "rust" => &[Language::Rust],
        "ruby" => &[Language::Ruby],
        "php" => &[Language::Php],
        "cpp" => &[Language::Cpp, Language::C],
        "swift" => &[Language::Swift],
        "kotlin" => &[Language::Kotlin],
        "scala" => &[Language::Scala],
        _ => &[],
    }
}

pub fn is_node_language(table_language: &str) -> bool {
    matches!(table_language, "javascript" | "typescript")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_language_maps_to_sources() {
        for spec in FRAMEWORKS {
            assert!(
                !source_languages(spec.language).is_empty(),
                "{} has no source language",
                spec.language
            );
            assert!(!spec.command.is_empty());
        }
    }

    #[test]
    fn structured_frameworks_take_output_placeholder() {
        let with_output: Vec<_> = FRAMEWORKS
            .iter()
            .filter(|f| f.command.iter().any(|a| a.contains(OUTPUT_PLACEHOLDER)))
            .map(|f| f.name)
            .collect();
        assert!(with_output.contains(&"pytest"));
        assert!(with_output.contains(&"jest"));
        assert!(!with_output.contains(&"gotest"));
    }
}
