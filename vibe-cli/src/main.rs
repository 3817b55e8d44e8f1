//! `vibe-verifier`: run the verification pipeline over one repository and
//! print the summary.

#![forbid(unsafe_code)]

mod cli;
mod progress;

use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use vibe_analysis::pipeline::{sanitizer_for, AnalysisResults, VibeVerifier};
use vibe_analysis::report::ConsoleReporter;
use vibe_analysis::tools::SystemToolRunner;
use vibe_core::errors::{ReportError, VibeErrorCode};
use vibe_core::events::EventDispatcher;
use vibe_core::tracing::init_tracing_with_default;
use vibe_core::{PipelineError, VibeConfig};

use cli::Cli;
use progress::ConsoleProgress;

/// Exit status when the run could not complete at all.
const EXIT_FATAL: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing_with_default(cli.log_directive());

    match run(&cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(EXIT_FATAL)),
        Err(e) => {
            tracing::error!(error = %e, "analysis aborted");
            eprintln!("Error: {}", e.coded_string());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: &Cli) -> Result<i32, PipelineError> {
    let overrides = cli.to_overrides();
    let config = VibeConfig::load(&cli.repo, cli.config.as_deref(), Some(&overrides))?;
    tracing::debug!(?config, "resolved configuration");

    let mut events = EventDispatcher::new();
    events.register(Arc::new(ConsoleProgress::stderr(cli.verbose)));

    let runner = SystemToolRunner;
    let result = VibeVerifier::new(&cli.repo, &config, &runner, &events).run()?;
    let data = &result.data;

    match config.report.effective_format() {
        "json" => print_json(&config, data)?,
        _ => print!("{}", ConsoleReporter::new(std::io::stdout().is_terminal()).render(data)),
    }

    Ok(vibe_analysis::exit_code(data))
}

fn print_json(config: &VibeConfig, data: &AnalysisResults) -> Result<(), PipelineError> {
    let serialization = |e: serde_json::Error| ReportError::Serialization {
        message: e.to_string(),
    };
    let value = match sanitizer_for(&config.report)? {
        Some(sanitizer) => sanitizer.sanitize_results(data),
        None => serde_json::to_value(data),
    }
    .map_err(serialization)?;
    let json = serde_json::to_string_pretty(&value).map_err(serialization)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").map_err(|source| ReportError::Io {
        path: "<stdout>".into(),
        source,
    })?;
    Ok(())
}
