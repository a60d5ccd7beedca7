//! Resolution orchestrator for coordinating the entire workflow
//!
//! This module provides:
//! - Workflow coordination: load specs → resolve → generate scripts
//! - Root spec loading from the CLI or an input file
//! - Target interpreter checks surfaced as warnings
//! - Progress display around the network-bound resolution phase

use crate::cli::CliArgs;
use crate::domain::{PackageSpec, PythonTarget, ResolutionResult};
use crate::error::{AppError, ConfigError};
use crate::progress::Progress;
use crate::registry::create_provider;
use crate::resolver::{ConcurrentFetcher, Resolver, ResolverConfig};
use crate::scripts::ScriptGenerator;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Orchestrator for coordinating the resolution workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
}

/// Result of running the orchestrator
pub struct RunReport {
    /// The resolution outcome
    pub result: ResolutionResult,
    /// Paths of generated files, empty when nothing was resolved
    pub generated: Vec<PathBuf>,
}

impl Orchestrator {
    /// Create a new orchestrator, validating the configuration
    pub fn new(args: CliArgs) -> Result<Self, ConfigError> {
        args.validate()?;
        Ok(Self { args })
    }

    /// Run the full workflow: load specs, resolve, generate scripts
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let roots = self.load_roots()?;
        let python = PythonTarget::parse(&self.args.python_version)?;

        let timeout = Duration::from_secs(self.args.timeout);
        let provider = create_provider(self.args.index_url.as_deref(), timeout)?;
        let fetcher = ConcurrentFetcher::new(provider, self.args.workers, timeout);

        let config = ResolverConfig::new(python.clone())
            .with_strategy(self.args.strategy)
            .with_prefer_lowest(self.args.prefer_lowest)
            .with_allow_downgrade(self.args.allow_downgrade)
            .with_max_passes(self.args.max_passes);

        let mut progress = Progress::new(!self.args.quiet && !self.args.json);
        progress.spinner(&format!(
            "Resolving {} root package(s) for Python {}...",
            roots.len(),
            python.requested()
        ));

        let mut resolver = Resolver::new(fetcher, config);
        let mut result = match resolver.resolve(&roots).await {
            Ok(result) => result,
            Err(err) => {
                progress.finish_and_clear();
                return Err(err.into());
            }
        };

        self.append_python_warnings(&python, &mut result);

        progress.set_message("Writing environment files...");
        let generator = ScriptGenerator::new(
            &self.args.output_dir,
            &self.args.venv_name,
            &self.args.python_version,
            self.args.requirements_only,
        );
        let generated = generator.generate(&result);
        progress.finish_and_clear();

        Ok(RunReport {
            result,
            generated: generated?,
        })
    }

    /// Load root specs from --packages or --input-file
    fn load_roots(&self) -> Result<Vec<PackageSpec>, AppError> {
        if let Some(packages) = &self.args.packages {
            return Ok(parse_package_list(packages, ',')?);
        }

        // validate() guarantees one of the two is present
        let path = self.args.input_file.as_deref().unwrap_or(Path::new(""));
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::InputFileError {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(parse_package_list(&content, '\n')?)
    }

    fn append_python_warnings(&self, python: &PythonTarget, result: &mut ResolutionResult) {
        if python.is_end_of_life() {
            result.add_warning(format!(
                "Python {} has reached end of life and no longer receives fixes",
                python.requested()
            ));
        }
        // A minor that stayed two segments long was not in the known
        // release table, so requires_python floors compare against x.y.0
        if python.version().release().len() == 2 {
            result.add_warning(format!(
                "unrecognized Python release line '{}': requires_python markers are \
                 checked against {}",
                python.requested(),
                python.version()
            ));
        }
    }
}

/// Parse a separated list of package specs, skipping blanks and comments
fn parse_package_list(
    input: &str,
    separator: char,
) -> Result<Vec<PackageSpec>, crate::error::SpecError> {
    let mut specs = Vec::new();
    for entry in input.split(separator) {
        let entry = entry.split('#').next().unwrap_or("").trim();
        if entry.is_empty() {
            continue;
        }
        specs.push(PackageSpec::parse(entry)?);
    }
    Ok(specs)
}
