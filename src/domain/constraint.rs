//! Version constraints
//!
//! Handles the constraint operators that appear in requirement strings:
//! - Exact and exclusion: `==1.2.3`, `!=1.5.0`
//! - Bounds: `>=1.0`, `>1.0`, `<=2.0`, `<2.0`
//! - Compatible release: `~=2.2` (at least 2.2, below 3.0)
//!
//! A constraint is a single operator plus version. Requirement strings
//! carry a comma separated list of them, combined conjunctively.

use crate::domain::Version;
use crate::error::SpecError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a version constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintOp {
    Exact,
    NotEqual,
    GreaterOrEqual,
    LessOrEqual,
    Greater,
    Less,
    Compatible,
}

// Two-character operators first so ">=" is not read as ">" followed by "=1.0"
const OPERATORS: [(&str, ConstraintOp); 7] = [
    ("==", ConstraintOp::Exact),
    (">=", ConstraintOp::GreaterOrEqual),
    ("<=", ConstraintOp::LessOrEqual),
    ("~=", ConstraintOp::Compatible),
    ("!=", ConstraintOp::NotEqual),
    (">", ConstraintOp::Greater),
    ("<", ConstraintOp::Less),
];

impl ConstraintOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintOp::Exact => "==",
            ConstraintOp::NotEqual => "!=",
            ConstraintOp::GreaterOrEqual => ">=",
            ConstraintOp::LessOrEqual => "<=",
            ConstraintOp::Greater => ">",
            ConstraintOp::Less => "<",
            ConstraintOp::Compatible => "~=",
        }
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single operator/version pair such as `>=2.0` or `~=1.4.2`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionConstraint {
    pub op: ConstraintOp,
    pub version: Version,
}

impl VersionConstraint {
    /// Parses one constraint like `>=1.0` or `~=2.2`
    pub fn parse(input: &str) -> Result<Self, SpecError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SpecError::invalid_constraint(input, "empty constraint"));
        }

        for (symbol, op) in OPERATORS {
            if let Some(rest) = trimmed.strip_prefix(symbol) {
                let version = Version::parse(rest)?;
                if op == ConstraintOp::Compatible && version.release().len() < 2 {
                    return Err(SpecError::invalid_constraint(
                        trimmed,
                        "compatible release needs at least two version segments",
                    ));
                }
                return Ok(VersionConstraint { op, version });
            }
        }

        Err(SpecError::invalid_constraint(
            trimmed,
            "missing comparison operator",
        ))
    }

    /// Whether `candidate` satisfies this constraint
    ///
    /// `==` and `!=` disregard local labels. `~=` pins every release
    /// segment except the last, so `~=2.2` accepts 2.2 through 2.x but
    /// not 3.0, and `~=1.4.5` accepts 1.4.x at or above 1.4.5.
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.op {
            ConstraintOp::Exact => candidate.eq_ignoring_local(&self.version),
            ConstraintOp::NotEqual => !candidate.eq_ignoring_local(&self.version),
            ConstraintOp::GreaterOrEqual => candidate >= &self.version,
            ConstraintOp::LessOrEqual => candidate <= &self.version,
            ConstraintOp::Greater => candidate > &self.version,
            ConstraintOp::Less => candidate < &self.version,
            ConstraintOp::Compatible => {
                let release = self.version.release();
                let prefix = &release[..release.len() - 1];
                candidate >= &self.version && candidate.release_starts_with(prefix)
            }
        }
    }
}

/// Whether `version` satisfies every constraint in the list
///
/// Constraint lists are conjunctive; an empty list accepts everything.
pub fn all_satisfied(constraints: &[VersionConstraint], version: &Version) -> bool {
    constraints.iter().all(|c| c.matches(version))
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl FromStr for VersionConstraint {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionConstraint::parse(s)
    }
}

impl Serialize for VersionConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
