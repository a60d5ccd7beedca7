//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SpecError: Malformed package spec or constraint text
//! - RegistryError: Issues with package index communication
//! - ResolveError: Conflicts that abort resolution under the fail strategy
//! - ConfigError: Issues with CLI configuration
//! - ScriptError: Failures while writing generated files
//!
//! Per-package registry failures are contained by the resolver and surface as
//! unresolved entries; only root spec parse errors, configuration errors and
//! fail-strategy conflicts abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Spec or constraint parsing errors
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Package index related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Script generation errors
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Errors raised while parsing package specs and version constraints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Version text did not match the recognized grammar
    #[error("invalid version '{input}': {message}")]
    InvalidVersion { input: String, message: String },

    /// Constraint text did not match operator+version
    #[error("invalid constraint '{input}': {message}")]
    InvalidConstraint { input: String, message: String },

    /// Spec string had no usable package name
    #[error("invalid package spec '{input}': missing package name")]
    MissingName { input: String },

    /// Package name contained characters outside the allowed set
    #[error("invalid package name '{name}'")]
    InvalidName { name: String },
}

/// Errors related to package index communication
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    /// Package not found in the index; terminal, never retried
    #[error("package '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Response body could not be decoded
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Request exceeded the per-request timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors that abort a resolution run
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// Unsatisfiable constraints under the fail strategy
    #[error("conflicting constraints for '{package}': {details}")]
    Conflict { package: String, details: String },
}

/// Errors related to CLI configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Worker pool size outside the supported bounds
    #[error("invalid worker count {value}: expected 1 to {max}")]
    InvalidWorkerCount { value: usize, max: usize },

    /// Unknown conflict strategy name
    #[error("invalid conflict strategy '{value}': expected 'auto', 'manual', 'ignore', or 'fail'")]
    InvalidStrategy { value: String },

    /// Target interpreter version did not parse
    #[error("invalid python version '{value}'")]
    InvalidPythonVersion { value: String },

    /// Neither --packages nor --input-file was given
    #[error("no packages specified: use --packages or --input-file")]
    MissingInput,

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// Input file could not be read
    #[error("failed to read package list {path}: {source}")]
    InputFileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while writing generated scripts
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Output directory could not be created
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated file could not be written
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpecError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(input: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::InvalidVersion {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidConstraint error
    pub fn invalid_constraint(input: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::InvalidConstraint {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingName error
    pub fn missing_name(input: impl Into<String>) -> Self {
        SpecError::MissingName {
            input: input.into(),
        }
    }

    /// Creates an InvalidName error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        SpecError::InvalidName { name: name.into() }
    }
}

impl ResolveError {
    /// Creates a new Conflict error
    pub fn conflict(package: impl Into<String>, details: impl Into<String>) -> Self {
        ResolveError::Conflict {
            package: package.into(),
            details: details.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// True when the failure is worth retrying.
    ///
    /// PackageNotFound is terminal; everything else is transient.
    pub fn is_transient(&self) -> bool {
        !matches!(self, RegistryError::PackageNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_error_invalid_version() {
        let err = SpecError::invalid_version("1..2", "empty release segment");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version"));
        assert!(msg.contains("1..2"));
    }

    #[test]
    fn test_spec_error_invalid_constraint() {
        let err = SpecError::invalid_constraint(">>1.0", "unknown operator");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid constraint"));
        assert!(msg.contains(">>1.0"));
    }

    #[test]
    fn test_spec_error_missing_name() {
        let err = SpecError::missing_name(">=1.0");
        let msg = format!("{}", err);
        assert!(msg.contains("missing package name"));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("doesnotexist123", "PyPI");
        let msg = format!("{}", err);
        assert!(msg.contains("package 'doesnotexist123' not found"));
        assert!(msg.contains("PyPI"));
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("requests", "PyPI", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::rate_limit_exceeded("PyPI");
        let msg = format!("{}", err);
        assert!(msg.contains("rate limit exceeded"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("numpy", "PyPI");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("numpy"));
    }

    #[test]
    fn test_registry_error_transient_classification() {
        assert!(!RegistryError::package_not_found("x", "PyPI").is_transient());
        assert!(RegistryError::timeout("x", "PyPI").is_transient());
        assert!(RegistryError::network_error("x", "PyPI", "reset").is_transient());
        assert!(RegistryError::rate_limit_exceeded("PyPI").is_transient());
        assert!(RegistryError::invalid_response("x", "PyPI", "bad json").is_transient());
    }

    #[test]
    fn test_config_error_invalid_workers() {
        let err = ConfigError::InvalidWorkerCount { value: 80, max: 50 };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid worker count 80"));
    }

    #[test]
    fn test_config_error_missing_input() {
        let err = ConfigError::MissingInput;
        assert!(format!("{}", err).contains("--packages or --input-file"));
    }

    #[test]
    fn test_config_error_conflicting_options() {
        let err = ConfigError::ConflictingOptions {
            message: "--quiet and --verbose cannot be used together".to_string(),
        };
        assert!(format!("{}", err).contains("conflicting options"));
    }

    #[test]
    fn test_app_error_from_spec_error() {
        let spec_err = SpecError::missing_name(">=1.0");
        let app_err: AppError = spec_err.into();
        assert!(format!("{}", app_err).contains("missing package name"));
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let reg_err = RegistryError::package_not_found("pkg", "PyPI");
        let app_err: AppError = reg_err.into();
        assert!(format!("{}", app_err).contains("package 'pkg' not found"));
    }

    #[test]
    fn test_resolve_error_conflict() {
        let err = ResolveError::conflict("urllib3", ">=2.0.0 vs <1.0.0");
        let msg = format!("{}", err);
        assert!(msg.contains("conflicting constraints for 'urllib3'"));
        assert!(msg.contains(">=2.0.0 vs <1.0.0"));
    }

    #[test]
    fn test_app_error_from_resolve_error() {
        let res_err = ResolveError::conflict("requests", "no candidate");
        let app_err: AppError = res_err.into();
        assert!(format!("{}", app_err).contains("conflicting constraints"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let cfg_err = ConfigError::InvalidStrategy {
            value: "maybe".to_string(),
        };
        let app_err: AppError = cfg_err.into();
        assert!(format!("{}", app_err).contains("invalid conflict strategy"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = SpecError::missing_name("x");
        let debug = format!("{:?}", err);
        assert!(debug.contains("MissingName"));
    }
}
