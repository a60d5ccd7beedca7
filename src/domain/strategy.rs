//! Conflict handling strategies

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the resolver reacts when collected constraints disagree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Pick the newest version that satisfies the direct constraints plus
    /// as many transitive ones as possible
    #[default]
    Auto,
    /// Never pick automatically; report the conflict and leave the
    /// package unresolved
    Manual,
    /// Disregard the conflicting constraints and pick the newest version
    Ignore,
    /// Abort the whole run on the first conflict
    Fail,
}

impl ConflictStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictStrategy::Auto => "auto",
            ConflictStrategy::Manual => "manual",
            ConflictStrategy::Ignore => "ignore",
            ConflictStrategy::Fail => "fail",
        }
    }

    /// Returns all strategies, in help-text order
    pub fn all() -> &'static [ConflictStrategy] {
        &[
            ConflictStrategy::Auto,
            ConflictStrategy::Manual,
            ConflictStrategy::Ignore,
            ConflictStrategy::Fail,
        ]
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConflictStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ConflictStrategy::Auto),
            "manual" => Ok(ConflictStrategy::Manual),
            "ignore" => Ok(ConflictStrategy::Ignore),
            "fail" => Ok(ConflictStrategy::Fail),
            _ => Err(ConfigError::InvalidStrategy {
                value: s.to_string(),
            }),
        }
    }
}
