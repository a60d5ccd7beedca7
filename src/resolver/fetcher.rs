//! Concurrent metadata fetching with a bounded worker pool
//!
//! This module provides:
//! - Batched, semaphore-limited fetches against the MetadataProvider
//! - Per-run coalescing: one network round-trip per package name
//! - Retry with fixed backoff for transient failures
//! - Terminal outcomes for every requested name (the batch is the unit
//!   of synchronization)

use crate::domain::{PackageMetadata, PackageSpec, Version};
use crate::error::RegistryError;
use crate::registry::MetadataProvider;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default worker pool size
pub const DEFAULT_WORKERS: usize = 10;

/// Largest allowed worker pool size
pub const MAX_WORKERS: usize = 50;

/// Retries after the first failed attempt
pub const DEFAULT_RETRIES: usize = 2;

/// Pause between attempts for transient failures
const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Batched metadata fetcher over a fixed-size worker pool
///
/// Owns the per-call caches: package metadata is written at most once per
/// name, dependency lists at most once per (name, version). The resolver
/// clears both at the start of every resolution call, so nothing persists
/// across calls.
pub struct ConcurrentFetcher {
    provider: Arc<dyn MetadataProvider>,
    semaphore: Arc<Semaphore>,
    timeout: Duration,
    retries: usize,
    metadata: HashMap<String, Arc<PackageMetadata>>,
    dependencies: HashMap<(String, String), Vec<PackageSpec>>,
}

impl ConcurrentFetcher {
    /// Creates a fetcher with the given pool size and per-request timeout
    ///
    /// The pool size is clamped to 1..=50.
    pub fn new(provider: Arc<dyn MetadataProvider>, workers: usize, timeout: Duration) -> Self {
        let workers = workers.clamp(1, MAX_WORKERS);
        Self {
            provider,
            semaphore: Arc::new(Semaphore::new(workers)),
            timeout,
            retries: DEFAULT_RETRIES,
            metadata: HashMap::new(),
            dependencies: HashMap::new(),
        }
    }

    /// Overrides the retry budget, mainly for tests
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Already-fetched metadata for a package, if any
    pub fn cached(&self, name: &str) -> Option<Arc<PackageMetadata>> {
        self.metadata.get(name).cloned()
    }

    /// Drops everything cached so far
    ///
    /// Coalescing is scoped to one resolution call; releases published
    /// after a call must be visible to the next one.
    pub fn clear(&mut self) {
        self.metadata.clear();
        self.dependencies.clear();
    }

    /// Fetches release metadata for every name in the batch
    ///
    /// Returns once every name has a terminal outcome. Names already in
    /// the per-run cache are answered without a network round-trip, so
    /// any number of dependents on one package cost a single fetch.
    pub async fn fetch_all(
        &mut self,
        names: &BTreeSet<String>,
    ) -> HashMap<String, Result<Arc<PackageMetadata>, RegistryError>> {
        let mut results = HashMap::new();
        let mut tasks = JoinSet::new();

        for name in names {
            if let Some(cached) = self.metadata.get(name) {
                results.insert(name.clone(), Ok(Arc::clone(cached)));
                continue;
            }
            tasks.spawn(fetch_one(
                Arc::clone(&self.provider),
                Arc::clone(&self.semaphore),
                name.clone(),
                self.timeout,
                self.retries,
            ));
        }

        while let Some(joined) = tasks.join_next().await {
            // Worker tasks neither panic nor get aborted
            let (name, outcome) = joined.unwrap();
            let outcome = outcome.map(|metadata| {
                let metadata = Arc::new(metadata);
                self.metadata.insert(name.clone(), Arc::clone(&metadata));
                metadata
            });
            results.insert(name, outcome);
        }

        results
    }

    /// Fetches the direct dependency lists for a batch of chosen releases
    ///
    /// Duplicate pairs are coalesced; successful lookups are cached per
    /// (name, version). A failed lookup is reported once and cached as
    /// empty so a re-opened package does not retry it.
    pub async fn fetch_dependencies(
        &mut self,
        requests: &[(String, Version)],
    ) -> HashMap<(String, String), Result<Vec<PackageSpec>, RegistryError>> {
        let mut results = HashMap::new();
        let mut tasks = JoinSet::new();
        let mut in_flight = HashSet::new();

        for (name, version) in requests {
            let key = (name.clone(), version.as_str().to_string());
            if let Some(cached) = self.dependencies.get(&key) {
                results.insert(key, Ok(cached.clone()));
                continue;
            }
            if !in_flight.insert(key) {
                continue;
            }
            tasks.spawn(fetch_dependencies_one(
                Arc::clone(&self.provider),
                Arc::clone(&self.semaphore),
                name.clone(),
                version.clone(),
                self.timeout,
                self.retries,
            ));
        }

        while let Some(joined) = tasks.join_next().await {
            let (key, outcome) = joined.unwrap();
            match outcome {
                Ok(specs) => {
                    self.dependencies.insert(key.clone(), specs.clone());
                    results.insert(key, Ok(specs));
                }
                Err(err) => {
                    self.dependencies.insert(key.clone(), Vec::new());
                    results.insert(key, Err(err));
                }
            }
        }

        results
    }
}

/// One pooled fetch of a package's release listing, with retries
async fn fetch_one(
    provider: Arc<dyn MetadataProvider>,
    semaphore: Arc<Semaphore>,
    name: String,
    per_request_timeout: Duration,
    retries: usize,
) -> (String, Result<PackageMetadata, RegistryError>) {
    let _permit = semaphore.acquire_owned().await.unwrap();

    let mut attempt = 0;
    loop {
        let outcome = match tokio::time::timeout(per_request_timeout, provider.fetch(&name)).await {
            Ok(result) => result,
            Err(_) => Err(RegistryError::timeout(&name, provider.index_name())),
        };

        match outcome {
            Ok(metadata) => return (name, Ok(metadata)),
            Err(err) if err.is_transient() && attempt < retries => {
                attempt += 1;
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
            Err(err) => return (name, Err(err)),
        }
    }
}

/// One pooled fetch of a release's dependency list, with retries
async fn fetch_dependencies_one(
    provider: Arc<dyn MetadataProvider>,
    semaphore: Arc<Semaphore>,
    name: String,
    version: Version,
    per_request_timeout: Duration,
    retries: usize,
) -> ((String, String), Result<Vec<PackageSpec>, RegistryError>) {
    let _permit = semaphore.acquire_owned().await.unwrap();
    let key = (name.clone(), version.as_str().to_string());

    let mut attempt = 0;
    loop {
        let outcome = match tokio::time::timeout(
            per_request_timeout,
            provider.dependencies(&name, &version),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RegistryError::timeout(&name, provider.index_name())),
        };

        match outcome {
            Ok(specs) => return (key, Ok(specs)),
            Err(err) if err.is_transient() && attempt < retries => {
                attempt += 1;
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
            Err(err) => return (key, Err(err)),
        }
    }
}
