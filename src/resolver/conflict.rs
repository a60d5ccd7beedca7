//! Conflict resolution
//!
//! Invoked when no candidate version satisfies a package's accumulated
//! constraint set. The strategy is fixed per run:
//! - auto: honor root constraints, satisfy as many transitive ones as possible
//! - manual: report only, with per-candidate failure diagnostics
//! - ignore: newest candidate regardless of constraints
//! - fail: abort the whole run

use crate::domain::{
    CandidateFailure, ConflictStrategy, ConstraintOp, ConstraintOrigin, PackageConflict,
    ReleaseEntry, Version,
};
use crate::error::ResolveError;

/// Candidate versions listed per conflict under the manual strategy
const MANUAL_CANDIDATE_LIMIT: usize = 10;

/// What the conflict path decided for one package
#[derive(Debug)]
pub(crate) enum ConflictOutcome {
    /// A version was picked despite the conflict; the record explains what
    /// was ignored
    Picked {
        version: Version,
        conflict: PackageConflict,
    },
    /// No version was picked; the package stays unresolved
    Open { conflict: PackageConflict },
}

/// Strategy dispatch for unsatisfiable constraint sets
pub(crate) struct ConflictResolver {
    strategy: ConflictStrategy,
    allow_downgrade: bool,
}

impl ConflictResolver {
    pub fn new(strategy: ConflictStrategy, allow_downgrade: bool) -> Self {
        Self {
            strategy,
            allow_downgrade,
        }
    }

    /// Decides the outcome for a package whose constraint set no candidate
    /// satisfies
    ///
    /// `candidates` are the admissible versions in selection preference
    /// order; `newest_available` is the newest published version overall,
    /// used by the ignore strategy when the interpreter filter left no
    /// candidates. The fail strategy aborts the run instead of returning.
    pub fn resolve(
        &self,
        package: &str,
        origins: &[ConstraintOrigin],
        candidates: &[&ReleaseEntry],
        newest_available: Option<&Version>,
    ) -> Result<ConflictOutcome, ResolveError> {
        match self.strategy {
            ConflictStrategy::Fail => Err(ResolveError::conflict(package, describe(origins))),
            ConflictStrategy::Auto => Ok(self.auto(package, origins, candidates)),
            ConflictStrategy::Manual => Ok(self.manual(package, origins, candidates)),
            ConflictStrategy::Ignore => {
                Ok(self.ignore(package, origins, candidates, newest_available))
            }
        }
    }

    /// Picks the first candidate satisfying every root constraint and the
    /// largest number of transitive ones
    ///
    /// Without `allow_downgrade`, candidates below the highest floor any
    /// `>`/`>=` constraint demands are not considered.
    fn auto(
        &self,
        package: &str,
        origins: &[ConstraintOrigin],
        candidates: &[&ReleaseEntry],
    ) -> ConflictOutcome {
        let floor = if self.allow_downgrade {
            None
        } else {
            highest_floor(origins)
        };

        let mut best: Option<(&ReleaseEntry, usize)> = None;
        for candidate in candidates {
            if let Some(floor) = floor {
                if candidate.version < *floor {
                    continue;
                }
            }
            if !origins
                .iter()
                .filter(|o| o.is_root())
                .all(|o| o.constraint.matches(&candidate.version))
            {
                continue;
            }

            let satisfied = origins
                .iter()
                .filter(|o| !o.is_root())
                .filter(|o| o.constraint.matches(&candidate.version))
                .count();
            // Preference order breaks ties, so strictly-better only
            if best.map_or(true, |(_, count)| satisfied > count) {
                best = Some((candidate, satisfied));
            }
        }

        match best {
            Some((entry, _)) => {
                let ignored = failing(origins, &entry.version);
                ConflictOutcome::Picked {
                    version: entry.version.clone(),
                    conflict: PackageConflict {
                        package: package.to_string(),
                        conflicting_constraints: origins.to_vec(),
                        resolution: Some(entry.version.clone()),
                        strategy_used: self.strategy,
                        ignored_constraints: ignored,
                        candidate_failures: Vec::new(),
                    },
                }
            }
            None => ConflictOutcome::Open {
                conflict: PackageConflict {
                    package: package.to_string(),
                    conflicting_constraints: origins.to_vec(),
                    resolution: None,
                    strategy_used: self.strategy,
                    ignored_constraints: Vec::new(),
                    candidate_failures: Vec::new(),
                },
            },
        }
    }

    /// Reports the conflict with per-candidate diagnostics and leaves the
    /// package unresolved
    fn manual(
        &self,
        package: &str,
        origins: &[ConstraintOrigin],
        candidates: &[&ReleaseEntry],
    ) -> ConflictOutcome {
        let candidate_failures = candidates
            .iter()
            .take(MANUAL_CANDIDATE_LIMIT)
            .map(|entry| CandidateFailure {
                version: entry.version.clone(),
                failed: failing(origins, &entry.version),
            })
            .collect();

        ConflictOutcome::Open {
            conflict: PackageConflict {
                package: package.to_string(),
                conflicting_constraints: origins.to_vec(),
                resolution: None,
                strategy_used: self.strategy,
                ignored_constraints: Vec::new(),
                candidate_failures,
            },
        }
    }

    /// Picks the newest candidate regardless of constraint satisfaction
    fn ignore(
        &self,
        package: &str,
        origins: &[ConstraintOrigin],
        candidates: &[&ReleaseEntry],
        newest_available: Option<&Version>,
    ) -> ConflictOutcome {
        let chosen = candidates
            .iter()
            .map(|entry| &entry.version)
            .max()
            .or(newest_available);

        match chosen {
            Some(version) => ConflictOutcome::Picked {
                version: version.clone(),
                conflict: PackageConflict {
                    package: package.to_string(),
                    conflicting_constraints: origins.to_vec(),
                    resolution: Some(version.clone()),
                    strategy_used: self.strategy,
                    ignored_constraints: failing(origins, version),
                    candidate_failures: Vec::new(),
                },
            },
            None => ConflictOutcome::Open {
                conflict: PackageConflict {
                    package: package.to_string(),
                    conflicting_constraints: origins.to_vec(),
                    resolution: None,
                    strategy_used: self.strategy,
                    ignored_constraints: Vec::new(),
                    candidate_failures: Vec::new(),
                },
            },
        }
    }
}

/// The constraints from `origins` that `version` does not satisfy
fn failing(origins: &[ConstraintOrigin], version: &Version) -> Vec<ConstraintOrigin> {
    origins
        .iter()
        .filter(|o| !o.constraint.matches(version))
        .cloned()
        .collect()
}

/// The highest version any lower-bound constraint demands
fn highest_floor(origins: &[ConstraintOrigin]) -> Option<&Version> {
    origins
        .iter()
        .filter(|o| {
            matches!(
                o.constraint.op,
                ConstraintOp::Greater | ConstraintOp::GreaterOrEqual
            )
        })
        .map(|o| &o.constraint.version)
        .max()
}

/// Human-readable summary used in fail-strategy errors
fn describe(origins: &[ConstraintOrigin]) -> String {
    origins
        .iter()
        .map(|o| format!("{} (required by {})", o.constraint, o.required_by))
        .collect::<Vec<_>>()
        .join(", ")
}
