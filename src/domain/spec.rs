//! Package requirement specs
//!
//! Handles requirement strings as they appear on the command line, in input
//! files and in index metadata:
//! - Bare names: `requests`
//! - Constrained: `flask>=2.0`, `numpy>=1.20,<2.0`, `django~=4.2`
//! - Extras are stripped: `uvicorn[standard]>=0.15` keeps only `uvicorn`
//! - Environment markers after `;` are dropped; requirements guarded by an
//!   `extra ==` marker are skipped entirely

use crate::domain::{all_satisfied, Version, VersionConstraint};
use crate::error::SpecError;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Extras group: [standard] or [all,dev]
static EXTRAS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

// Normalized name: runs of ., _ and - collapse to a single dash
static NAME_SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[._-]+").unwrap());

// Valid normalized package name
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").unwrap());

// Requirement guarded by an extra marker, e.g. `; extra == "socks"`
static EXTRA_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"extra\s*==").unwrap());

/// Normalizes a package name: lowercase, with `.`, `_` and `-` runs
/// collapsed to a single `-` (`Django` and `ruamel.yaml-clib` style names
/// compare equal to their index spellings)
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATORS_RE
        .replace_all(&name.trim().to_lowercase(), "-")
        .into_owned()
}

/// A requested package with its version constraints
///
/// Constraints are conjunctive. An empty list accepts any version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub constraints: Vec<VersionConstraint>,
}

impl PackageSpec {
    /// Parses a requirement like `flask>=2.0,<3.0` or a bare `requests`
    ///
    /// The name is normalized; extras and parentheses are stripped first.
    pub fn parse(input: &str) -> Result<Self, SpecError> {
        let stripped = EXTRAS_RE.replace_all(input, "");
        let cleaned = stripped.replace(['(', ')'], "");
        let trimmed = cleaned.trim();

        if trimmed.is_empty() {
            return Err(SpecError::missing_name(input.trim()));
        }

        let (name_part, constraint_part) = match trimmed.find(['<', '>', '=', '!', '~']) {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };

        let name = normalize_name(name_part);
        if name.is_empty() {
            return Err(SpecError::missing_name(input.trim()));
        }
        if !NAME_RE.is_match(&name) {
            return Err(SpecError::invalid_name(name_part.trim()));
        }

        let mut constraints = Vec::new();
        for part in constraint_part.split(',') {
            if part.trim().is_empty() {
                continue;
            }
            constraints.push(VersionConstraint::parse(part)?);
        }

        Ok(PackageSpec { name, constraints })
    }

    /// Parses a `requires_dist` style requirement, handling environment
    /// markers
    ///
    /// Returns `Ok(None)` when the requirement only applies to an extra,
    /// since those are never installed by default.
    pub fn from_requirement(input: &str) -> Result<Option<Self>, SpecError> {
        let (base, marker) = match input.split_once(';') {
            Some((base, marker)) => (base, Some(marker)),
            None => (input, None),
        };

        if let Some(marker) = marker {
            if EXTRA_MARKER_RE.is_match(marker) {
                return Ok(None);
            }
        }

        PackageSpec::parse(base).map(Some)
    }

    /// Whether `version` satisfies every constraint of this spec
    pub fn matches(&self, version: &Version) -> bool {
        all_satisfied(&self.constraints, version)
    }

    /// True when the spec has no version constraints
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{constraint}")?;
        }
        Ok(())
    }
}

impl FromStr for PackageSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageSpec::parse(s)
    }
}

impl Serialize for PackageSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
