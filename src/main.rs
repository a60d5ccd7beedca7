//! pipsolve - Python dependency resolver CLI tool
//!
//! Resolves a set of Python package requirements against the PyPI JSON
//! API into a pinned, mutually compatible set of versions, then writes
//! requirements.txt and environment setup scripts.

use clap::Parser;
use pipsolve::cli::CliArgs;
use pipsolve::orchestrator::Orchestrator;
use pipsolve::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("pipsolve v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: Python {}", args.python_version);
        eprintln!("Strategy: {}", args.strategy);
    }

    let orchestrator = Orchestrator::new(args.clone())?;
    let report = orchestrator.run().await?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.no_color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report.result, &mut stdout)?;
    stdout.flush()?;
    drop(stdout);

    if !args.quiet && !report.generated.is_empty() {
        eprintln!();
        eprintln!("Generated:");
        for path in &report.generated {
            eprintln!("  {}", path.display());
        }
    }

    // Clean resolutions exit 0; conflicts or unresolved packages exit 2
    if report.result.conflicts.is_empty() && report.result.unresolved.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}
