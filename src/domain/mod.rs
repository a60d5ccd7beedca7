//! Core domain models for pipsolve
//!
//! This module contains the fundamental types used throughout the application:
//! - Version and constraint types with PyPI ordering semantics
//! - Package requirement specs as given by the user or the index
//! - Target interpreter handling
//! - Resolution results, conflicts and metadata structures

mod constraint;
mod metadata;
mod python;
mod spec;
mod strategy;
mod version;

pub use constraint::{all_satisfied, ConstraintOp, VersionConstraint};
pub use metadata::{
    CandidateFailure, ConstraintOrigin, PackageConflict, PackageMetadata, ReleaseEntry,
    ResolutionResult, ResolvedPackage, ROOT_REQUIRER,
};
pub use python::{PythonRelease, PythonTarget, PYTHON_RELEASES};
pub use spec::{normalize_name, PackageSpec};
pub use strategy::ConflictStrategy;
pub use version::{PreKind, PreRelease, Version};
