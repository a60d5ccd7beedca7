//! The resolution engine
//!
//! This module provides:
//! - A pooled, coalescing metadata fetcher
//! - The breadth-first fixed-point resolver
//! - Conflict-strategy dispatch for unsatisfiable constraint sets

mod conflict;
mod engine;
mod fetcher;

pub use engine::{Resolver, ResolverConfig, DEFAULT_MAX_PASSES};
pub use fetcher::{ConcurrentFetcher, DEFAULT_RETRIES, DEFAULT_WORKERS, MAX_WORKERS};
