//! Resolution data model
//!
//! This module contains the structures the resolver works on and produces:
//! - Per-package release metadata fetched from the index
//! - Resolved package pins with their requirement chains
//! - Conflict records and the overall resolution result

use crate::domain::{ConflictStrategy, PackageSpec, Version, VersionConstraint};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One published release of a package
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseEntry {
    /// The release version
    pub version: Version,
    /// Direct dependencies, when the index response carried them;
    /// `None` means they have to be fetched separately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<PackageSpec>>,
    /// The `requires_python` marker published for this release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_python: Option<String>,
    /// Upload time of the earliest file in this release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
    /// Whether every file of this release was yanked
    pub yanked: bool,
}

impl ReleaseEntry {
    /// Creates a release entry with no metadata beyond the version
    pub fn new(version: Version) -> Self {
        Self {
            version,
            dependencies: None,
            requires_python: None,
            released_at: None,
            yanked: false,
        }
    }

    /// Sets the known direct dependencies
    pub fn with_dependencies(mut self, dependencies: Vec<PackageSpec>) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    /// Sets the `requires_python` marker
    pub fn with_requires_python(mut self, marker: impl Into<String>) -> Self {
        self.requires_python = Some(marker.into());
        self
    }

    /// Sets the release upload time
    pub fn with_released_at(mut self, released_at: DateTime<Utc>) -> Self {
        self.released_at = Some(released_at);
        self
    }

    /// Marks the release as yanked
    pub fn yanked(mut self) -> Self {
        self.yanked = true;
        self
    }
}

/// Everything known about one package for the duration of a run
///
/// Releases are kept sorted ascending by version, so the newest release
/// is always last.
#[derive(Debug, Clone, Serialize)]
pub struct PackageMetadata {
    /// Normalized package name
    pub name: String,
    /// Published releases, sorted ascending by version
    pub releases: Vec<ReleaseEntry>,
}

impl PackageMetadata {
    /// Creates package metadata, sorting the releases ascending
    pub fn new(name: impl Into<String>, mut releases: Vec<ReleaseEntry>) -> Self {
        releases.sort_by(|a, b| a.version.cmp(&b.version));
        Self {
            name: name.into(),
            releases,
        }
    }

    /// The newest known release
    pub fn latest(&self) -> Option<&ReleaseEntry> {
        self.releases.last()
    }

    /// Looks up the release entry for a version
    pub fn release(&self, version: &Version) -> Option<&ReleaseEntry> {
        self.releases.iter().rev().find(|r| &r.version == version)
    }

    /// All known versions, oldest first
    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.releases.iter().map(|r| &r.version)
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// A constraint together with the package that imposed it
///
/// Root requirements carry the pseudo-requirer `(root)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ConstraintOrigin {
    pub constraint: VersionConstraint,
    pub required_by: String,
}

impl ConstraintOrigin {
    pub fn new(constraint: VersionConstraint, required_by: impl Into<String>) -> Self {
        Self {
            constraint,
            required_by: required_by.into(),
        }
    }

    /// True when the constraint came from the user rather than another
    /// package
    pub fn is_root(&self) -> bool {
        self.required_by == ROOT_REQUIRER
    }
}

/// Requirer name recorded for constraints given by the user
pub const ROOT_REQUIRER: &str = "(root)";

/// A package the resolver pinned to a version
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPackage {
    /// Normalized package name
    pub name: String,
    /// The pinned version
    pub version: Version,
    /// Whether the user asked for this package directly
    pub is_direct: bool,
    /// Packages whose dependencies pulled this one in
    pub required_by: Vec<String>,
    /// Upload time of the pinned release, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
}

/// A candidate version and the constraints it failed
#[derive(Debug, Clone, Serialize)]
pub struct CandidateFailure {
    pub version: Version,
    pub failed: Vec<ConstraintOrigin>,
}

/// A disagreement between collected constraints for one package
#[derive(Debug, Clone, Serialize)]
pub struct PackageConflict {
    /// The package the constraints disagree on
    pub package: String,
    /// Every constraint that was in play, with its origin
    pub conflicting_constraints: Vec<ConstraintOrigin>,
    /// The version picked despite the conflict, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Version>,
    /// The strategy that produced (or declined) the resolution
    pub strategy_used: ConflictStrategy,
    /// Constraints the picked version does not satisfy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_constraints: Vec<ConstraintOrigin>,
    /// Why individual candidates were rejected; filled in when no
    /// version was picked
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidate_failures: Vec<CandidateFailure>,
}

impl PackageConflict {
    /// True when a version was picked despite the conflict
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

/// The outcome of a resolution run
///
/// Every requested or discovered package ends up in exactly one of
/// `resolved` or `unresolved`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionResult {
    /// Pinned packages, keyed by normalized name
    pub resolved: BTreeMap<String, ResolvedPackage>,
    /// Conflicts encountered along the way, resolved or not
    pub conflicts: Vec<PackageConflict>,
    /// Packages that could not be pinned
    pub unresolved: BTreeSet<String>,
    /// Non-fatal anomalies worth telling the user about
    pub warnings: Vec<String>,
}

impl ResolutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every package was pinned
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Pinned packages in name order
    pub fn packages(&self) -> impl Iterator<Item = &ResolvedPackage> {
        self.resolved.values()
    }

    /// Number of packages the user asked for directly
    pub fn direct_count(&self) -> usize {
        self.resolved.values().filter(|p| p.is_direct).count()
    }

    /// Number of packages pulled in as dependencies
    pub fn transitive_count(&self) -> usize {
        self.resolved.len() - self.direct_count()
    }

    /// Conflicts that were left without a picked version
    pub fn open_conflicts(&self) -> impl Iterator<Item = &PackageConflict> {
        self.conflicts.iter().filter(|c| !c.is_resolved())
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}
