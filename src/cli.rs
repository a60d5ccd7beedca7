//! CLI argument parsing module for pipsolve

use crate::domain::ConflictStrategy;
use crate::error::ConfigError;
use crate::resolver::{DEFAULT_WORKERS, MAX_WORKERS};
use clap::Parser;
use std::path::PathBuf;

/// Parse the worker pool size, bounded to the supported range
fn parse_workers(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("invalid worker count: {}", s))?;
    if value == 0 || value > MAX_WORKERS {
        return Err(format!(
            "invalid worker count {}: expected 1 to {}",
            value, MAX_WORKERS
        ));
    }
    Ok(value)
}

/// Parse the per-request timeout in seconds
fn parse_timeout(s: &str) -> Result<u64, String> {
    let value: u64 = s.parse().map_err(|_| format!("invalid timeout: {}", s))?;
    if value == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(value)
}

/// Parse the conflict strategy name
fn parse_strategy(s: &str) -> Result<ConflictStrategy, String> {
    s.parse::<ConflictStrategy>().map_err(|e| e.to_string())
}

/// Parse the resolution pass limit
fn parse_max_passes(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("invalid pass limit: {}", s))?;
    if value == 0 {
        return Err("pass limit must be at least 1".to_string());
    }
    Ok(value)
}

/// Python dependency resolver
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pipsolve",
    version,
    about = "Resolve Python package dependencies into pinned versions"
)]
pub struct CliArgs {
    // Input
    /// Comma-separated package specs (e.g. "flask>=2.0,requests==2.31.0")
    #[arg(short, long)]
    pub packages: Option<String>,

    /// File with one package spec per line ('#' starts a comment)
    #[arg(short = 'f', long)]
    pub input_file: Option<PathBuf>,

    /// Target Python version (e.g. 3.9 or 3.11.4)
    #[arg(long, default_value = "3.9")]
    pub python_version: String,

    // Fetching
    /// Number of concurrent index requests
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10, value_parser = parse_timeout)]
    pub timeout: u64,

    /// Package index base URL (default: pypi.org JSON API)
    #[arg(long)]
    pub index_url: Option<String>,

    // Resolution
    /// Conflict strategy: auto, manual, ignore, or fail
    #[arg(short, long, default_value = "auto", value_parser = parse_strategy)]
    pub strategy: ConflictStrategy,

    /// Prefer the oldest satisfying version instead of the newest
    #[arg(long)]
    pub prefer_lowest: bool,

    /// Allow auto conflict handling to pick below the highest floor
    #[arg(long)]
    pub allow_downgrade: bool,

    /// Maximum resolution passes before giving up on oscillating packages
    #[arg(long, default_value_t = 10, value_parser = parse_max_passes)]
    pub max_passes: usize,

    // Script generation
    /// Directory for generated files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Name of the virtual environment in generated scripts
    #[arg(long, default_value = "venv")]
    pub venv_name: String,

    /// Generate only requirements.txt, no install scripts
    #[arg(short, long)]
    pub requirements_only: bool,

    // Output
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable quiet mode - pinned packages only
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Check option combinations clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.packages, &self.input_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingOptions {
                    message: "--packages and --input-file cannot be used together".to_string(),
                })
            }
            (None, None) => return Err(ConfigError::MissingInput),
            _ => {}
        }

        if self.quiet && self.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }

        Ok(())
    }
}
