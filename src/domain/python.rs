//! Target Python interpreter handling
//!
//! The resolver filters release candidates against a target interpreter
//! version. Users typically give a bare `3.9`; that is expanded to the
//! latest known patch release so `requires_python: ">=3.9.2"` markers
//! compare against something realistic.

use crate::domain::{all_satisfied, Version, VersionConstraint};
use crate::error::ConfigError;

/// A CPython release line we know the latest patch for
pub struct PythonRelease {
    pub minor: &'static str,
    pub latest_patch: &'static str,
    pub end_of_life: bool,
}

/// Release lines and their newest patch versions
pub const PYTHON_RELEASES: [PythonRelease; 7] = [
    PythonRelease {
        minor: "3.7",
        latest_patch: "3.7.18",
        end_of_life: true,
    },
    PythonRelease {
        minor: "3.8",
        latest_patch: "3.8.18",
        end_of_life: true,
    },
    PythonRelease {
        minor: "3.9",
        latest_patch: "3.9.18",
        end_of_life: false,
    },
    PythonRelease {
        minor: "3.10",
        latest_patch: "3.10.13",
        end_of_life: false,
    },
    PythonRelease {
        minor: "3.11",
        latest_patch: "3.11.9",
        end_of_life: false,
    },
    PythonRelease {
        minor: "3.12",
        latest_patch: "3.12.10",
        end_of_life: false,
    },
    PythonRelease {
        minor: "3.13",
        latest_patch: "3.13.5",
        end_of_life: false,
    },
];

/// The interpreter version packages must support
#[derive(Debug, Clone)]
pub struct PythonTarget {
    requested: String,
    version: Version,
}

impl PythonTarget {
    /// Parses a target like `3.9` or `3.11.4`
    ///
    /// A bare major.minor is expanded to the latest known patch release.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let trimmed = input.trim();
        let version = Version::parse(trimmed).map_err(|_| ConfigError::InvalidPythonVersion {
            value: input.to_string(),
        })?;

        if version.is_prerelease() || version.release().len() < 2 {
            return Err(ConfigError::InvalidPythonVersion {
                value: input.to_string(),
            });
        }

        let version = if version.release().len() == 2 {
            match PYTHON_RELEASES.iter().find(|r| r.minor == trimmed) {
                Some(release) => Version::parse(release.latest_patch)
                    .map_err(|_| ConfigError::InvalidPythonVersion {
                        value: input.to_string(),
                    })?,
                None => version,
            }
        } else {
            version
        };

        Ok(PythonTarget {
            requested: trimmed.to_string(),
            version,
        })
    }

    /// The full interpreter version used for compatibility checks
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The version exactly as the user gave it
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// True when the requested release line no longer receives fixes
    pub fn is_end_of_life(&self) -> bool {
        let release = self.version.release();
        let minor = format!(
            "{}.{}",
            release.first().copied().unwrap_or(0),
            release.get(1).copied().unwrap_or(0)
        );
        PYTHON_RELEASES
            .iter()
            .any(|r| r.minor == minor && r.end_of_life)
    }

    /// Whether this interpreter satisfies a `requires_python` marker
    ///
    /// Markers that fail to parse are treated as compatible rather than
    /// excluding every candidate release.
    pub fn is_compatible(&self, requires_python: &str) -> bool {
        let trimmed = requires_python.trim();
        if trimmed.is_empty() {
            return true;
        }

        let mut constraints = Vec::new();
        for part in trimmed.split(',') {
            match VersionConstraint::parse(part) {
                Ok(constraint) => constraints.push(constraint),
                Err(_) => return true,
            }
        }

        all_satisfied(&constraints, &self.version)
    }
}
