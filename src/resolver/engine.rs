//! The resolution engine
//!
//! A breadth-first walk over package names. Each pass batch-fetches
//! metadata for newly discovered packages, selects versions for every
//! package whose constraint set is open, and feeds the chosen versions'
//! dependencies back in as new constraints. Passes repeat until nothing
//! changes; a late constraint re-opens an already pinned package.
//!
//! The walk itself is sequential. Only the batched fetch calls run on the
//! worker pool, so the outcome is deterministic for a fixed metadata
//! snapshot regardless of fetch completion order.

use crate::domain::{
    ConflictStrategy, ConstraintOrigin, PackageConflict, PackageMetadata, PackageSpec,
    PythonTarget, ReleaseEntry, ResolutionResult, ResolvedPackage, Version, VersionConstraint,
    ROOT_REQUIRER,
};
use crate::error::ResolveError;
use crate::resolver::conflict::{ConflictOutcome, ConflictResolver};
use crate::resolver::ConcurrentFetcher;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Default bound on fixed-point passes
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Per-run resolution options
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// What to do when a constraint set is unsatisfiable
    pub strategy: ConflictStrategy,
    /// Select the oldest satisfying version instead of the newest
    pub prefer_lowest: bool,
    /// Let the auto strategy consider versions below accumulated floors
    pub allow_downgrade: bool,
    /// Bound on fixed-point passes before giving up on oscillating packages
    pub max_passes: usize,
    /// Interpreter the chosen versions must support
    pub python: PythonTarget,
}

impl ResolverConfig {
    pub fn new(python: PythonTarget) -> Self {
        Self {
            strategy: ConflictStrategy::default(),
            prefer_lowest: false,
            allow_downgrade: false,
            max_passes: DEFAULT_MAX_PASSES,
            python,
        }
    }

    pub fn with_strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_prefer_lowest(mut self, prefer_lowest: bool) -> Self {
        self.prefer_lowest = prefer_lowest;
        self
    }

    pub fn with_allow_downgrade(mut self, allow_downgrade: bool) -> Self {
        self.allow_downgrade = allow_downgrade;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }
}

/// Per-package progress through a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Seen as a dependency target, metadata not yet fetched
    Discovered,
    /// Metadata known, constraint set open for selection
    Open,
    /// Pinned to a version
    Resolved,
    /// Terminal: nothing can be pinned
    Unresolved,
}

/// The resolution engine
///
/// Owns all per-call state; `resolve` starts from scratch every time,
/// clearing the fetcher's caches along with the engine state, so a later
/// call sees releases published after an earlier one.
pub struct Resolver {
    fetcher: ConcurrentFetcher,
    config: ResolverConfig,
    conflicts: ConflictResolver,
    states: BTreeMap<String, State>,
    constraints: BTreeMap<String, Vec<ConstraintOrigin>>,
    metadata: BTreeMap<String, Arc<PackageMetadata>>,
    chosen: BTreeMap<String, Version>,
    direct: BTreeSet<String>,
    dependents: BTreeMap<String, BTreeSet<String>>,
    conflict_records: BTreeMap<String, PackageConflict>,
    warnings: Vec<String>,
}

impl Resolver {
    pub fn new(fetcher: ConcurrentFetcher, config: ResolverConfig) -> Self {
        let conflicts = ConflictResolver::new(config.strategy, config.allow_downgrade);
        Self {
            fetcher,
            config,
            conflicts,
            states: BTreeMap::new(),
            constraints: BTreeMap::new(),
            metadata: BTreeMap::new(),
            chosen: BTreeMap::new(),
            direct: BTreeSet::new(),
            dependents: BTreeMap::new(),
            conflict_records: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Resolves the given root specs into a consistent version assignment
    ///
    /// Per-package failures (missing packages, exhausted retries, open
    /// conflicts) are contained in the result; only the fail strategy
    /// turns a conflict into an error.
    pub async fn resolve(
        &mut self,
        roots: &[PackageSpec],
    ) -> Result<ResolutionResult, ResolveError> {
        self.reset();

        for spec in roots {
            self.direct.insert(spec.name.clone());
            self.states
                .entry(spec.name.clone())
                .or_insert(State::Discovered);
            self.constraints.entry(spec.name.clone()).or_default();
            for constraint in &spec.constraints {
                self.add_constraint(&spec.name, constraint.clone(), ROOT_REQUIRER);
            }
        }

        let mut pass = 0;
        loop {
            pass += 1;
            let mut changed = false;

            changed |= self.fetch_discovered().await;
            let selected = self.select_open(&mut changed)?;
            changed |= self.apply_dependencies(&selected).await;

            if !changed {
                break;
            }
            if pass >= self.config.max_passes {
                self.apply_cycle_guard();
                break;
            }
        }

        Ok(self.build_result())
    }

    /// Batch-fetches metadata for every `Discovered` package
    ///
    /// Successes open the package for selection; a missing package or an
    /// exhausted fetch makes it `Unresolved` with a warning and never
    /// contributes constraints downstream.
    async fn fetch_discovered(&mut self) -> bool {
        let frontier: BTreeSet<String> = self
            .states
            .iter()
            .filter(|(_, state)| **state == State::Discovered)
            .map(|(name, _)| name.clone())
            .collect();
        if frontier.is_empty() {
            return false;
        }

        let outcomes = self.fetcher.fetch_all(&frontier).await;
        for name in &frontier {
            match &outcomes[name] {
                Ok(metadata) if metadata.is_empty() => {
                    self.warnings
                        .push(format!("package '{name}' has no usable releases"));
                    self.states.insert(name.clone(), State::Unresolved);
                }
                Ok(metadata) => {
                    self.metadata.insert(name.clone(), Arc::clone(metadata));
                    self.states.insert(name.clone(), State::Open);
                }
                Err(err) => {
                    self.warnings.push(err.to_string());
                    self.states.insert(name.clone(), State::Unresolved);
                }
            }
        }
        true
    }

    /// Runs version selection for every `Open` package, in name order
    fn select_open(&mut self, changed: &mut bool) -> Result<Vec<(String, Version)>, ResolveError> {
        let open: Vec<String> = self
            .states
            .iter()
            .filter(|(_, state)| **state == State::Open)
            .map(|(name, _)| name.clone())
            .collect();

        let mut selected = Vec::new();
        for name in open {
            *changed = true;
            let (picked, conflict) = self.select_version(&name)?;
            match conflict {
                Some(conflict) => {
                    self.conflict_records.insert(name.clone(), conflict);
                }
                // A clean re-selection supersedes any stale conflict record
                None => {
                    self.conflict_records.remove(&name);
                }
            }
            match picked {
                Some(version) => {
                    self.chosen.insert(name.clone(), version.clone());
                    self.states.insert(name.clone(), State::Resolved);
                    selected.push((name, version));
                }
                None => {
                    self.chosen.remove(&name);
                    self.states.insert(name.clone(), State::Unresolved);
                }
            }
        }
        Ok(selected)
    }

    /// Picks a version for one package against its accumulated constraints
    ///
    /// Returns the chosen version (if any) and the conflict record to keep
    /// when the constraint set was unsatisfiable.
    fn select_version(
        &self,
        name: &str,
    ) -> Result<(Option<Version>, Option<PackageConflict>), ResolveError> {
        let metadata = &self.metadata[name];
        let origins = &self.constraints[name];
        let candidates = self.ordered_candidates(metadata);

        let satisfying = candidates.iter().find(|entry| {
            origins
                .iter()
                .all(|origin| origin.constraint.matches(&entry.version))
        });
        if let Some(entry) = satisfying {
            return Ok((Some(entry.version.clone()), None));
        }

        let newest_available = metadata
            .releases
            .iter()
            .rev()
            .find(|entry| !entry.yanked)
            .or_else(|| metadata.latest())
            .map(|entry| &entry.version);

        match self
            .conflicts
            .resolve(name, origins, &candidates, newest_available)?
        {
            ConflictOutcome::Picked { version, conflict } => Ok((Some(version), Some(conflict))),
            ConflictOutcome::Open { conflict } => Ok((None, Some(conflict))),
        }
    }

    /// Admissible candidates in selection preference order
    ///
    /// Yanked releases and releases whose `requires_python` rejects the
    /// target interpreter are excluded. Stable releases come first so a
    /// pre-release is only picked when no stable candidate satisfies the
    /// constraints; within each group the order is newest-first, or
    /// oldest-first in prefer-lowest mode.
    fn ordered_candidates<'a>(&self, metadata: &'a PackageMetadata) -> Vec<&'a ReleaseEntry> {
        let mut stable = Vec::new();
        let mut pre = Vec::new();
        for entry in &metadata.releases {
            if entry.yanked {
                continue;
            }
            if let Some(marker) = &entry.requires_python {
                if !self.config.python.is_compatible(marker) {
                    continue;
                }
            }
            if entry.version.is_prerelease() {
                pre.push(entry);
            } else {
                stable.push(entry);
            }
        }
        if !self.config.prefer_lowest {
            stable.reverse();
            pre.reverse();
        }
        stable.extend(pre);
        stable
    }

    /// Feeds the chosen versions' dependency specs back into the walk
    ///
    /// Dependency lists missing from the name-level metadata are fetched
    /// in one batch; a failed lookup leaves the package pinned, adds a
    /// warning, and contributes no constraints.
    async fn apply_dependencies(&mut self, selected: &[(String, Version)]) -> bool {
        let missing: Vec<(String, Version)> = selected
            .iter()
            .filter(|(name, version)| {
                self.metadata[name]
                    .release(version)
                    .is_some_and(|entry| entry.dependencies.is_none())
            })
            .cloned()
            .collect();

        let mut fetched = HashMap::new();
        if !missing.is_empty() {
            fetched = self.fetcher.fetch_dependencies(&missing).await;
        }

        let mut changed = false;
        for (name, version) in selected {
            let known = self.metadata[name]
                .release(version)
                .and_then(|entry| entry.dependencies.clone());
            let deps = match known {
                Some(deps) => deps,
                None => {
                    let key = (name.clone(), version.as_str().to_string());
                    match fetched.get(&key) {
                        Some(Ok(specs)) => specs.clone(),
                        Some(Err(err)) => {
                            self.warnings.push(format!(
                                "could not fetch dependencies of {name} {version}: {err}; \
                                 continuing without them"
                            ));
                            Vec::new()
                        }
                        None => Vec::new(),
                    }
                }
            };

            for dep in deps {
                if dep.name == *name {
                    continue;
                }
                self.dependents
                    .entry(dep.name.clone())
                    .or_default()
                    .insert(name.clone());
                if !self.states.contains_key(&dep.name) {
                    self.states.insert(dep.name.clone(), State::Discovered);
                    self.constraints.entry(dep.name.clone()).or_default();
                    changed = true;
                }
                for constraint in &dep.constraints {
                    if self.add_constraint(&dep.name, constraint.clone(), name) {
                        changed = true;
                        self.maybe_reopen(&dep.name, constraint);
                    }
                }
            }
        }
        changed
    }

    /// Appends a constraint origin if the exact pair is new
    ///
    /// Accumulation is monotonic: pairs are only ever added.
    fn add_constraint(
        &mut self,
        name: &str,
        constraint: VersionConstraint,
        required_by: &str,
    ) -> bool {
        let origins = self.constraints.entry(name.to_string()).or_default();
        let origin = ConstraintOrigin::new(constraint, required_by);
        if origins.contains(&origin) {
            return false;
        }
        origins.push(origin);
        true
    }

    /// Pulls a pinned package back into selection when a late constraint
    /// invalidates its chosen version
    fn maybe_reopen(&mut self, name: &str, new_constraint: &VersionConstraint) {
        if self.states.get(name) != Some(&State::Resolved) {
            return;
        }
        // Re-selecting would pick the same version when it still satisfies
        // the enlarged set, so only an invalidated pin re-opens
        if new_constraint.matches(&self.chosen[name]) {
            return;
        }
        self.states.insert(name.to_string(), State::Open);
        self.chosen.remove(name);
    }

    /// Terminates packages still oscillating when the pass bound is hit
    fn apply_cycle_guard(&mut self) {
        let stuck: Vec<String> = self
            .states
            .iter()
            .filter(|(_, state)| matches!(state, State::Open | State::Discovered))
            .map(|(name, _)| name.clone())
            .collect();

        for name in stuck {
            self.warnings.push(format!(
                "constraint set for '{}' did not stabilize within {} passes",
                name, self.config.max_passes
            ));
            self.conflict_records.insert(
                name.clone(),
                PackageConflict {
                    package: name.clone(),
                    conflicting_constraints: self.constraints[&name].clone(),
                    resolution: None,
                    strategy_used: self.config.strategy,
                    ignored_constraints: Vec::new(),
                    candidate_failures: Vec::new(),
                },
            );
            self.chosen.remove(&name);
            self.states.insert(name, State::Unresolved);
        }
    }

    fn build_result(&self) -> ResolutionResult {
        let mut result = ResolutionResult::new();
        result.warnings = self.warnings.clone();

        for (name, state) in &self.states {
            match state {
                State::Resolved => {
                    let version = self.chosen[name].clone();
                    let released_at = self
                        .metadata
                        .get(name)
                        .and_then(|m| m.release(&version))
                        .and_then(|entry| entry.released_at);
                    let required_by = self
                        .dependents
                        .get(name)
                        .map(|deps| deps.iter().cloned().collect())
                        .unwrap_or_default();
                    result.resolved.insert(
                        name.clone(),
                        ResolvedPackage {
                            name: name.clone(),
                            version,
                            is_direct: self.direct.contains(name),
                            required_by,
                            released_at,
                        },
                    );
                }
                State::Unresolved => {
                    result.unresolved.insert(name.clone());
                }
                State::Discovered | State::Open => {}
            }
        }

        result.conflicts = self.conflict_records.values().cloned().collect();
        result
    }

    fn reset(&mut self) {
        self.fetcher.clear();
        self.states.clear();
        self.constraints.clear();
        self.metadata.clear();
        self.chosen.clear();
        self.direct.clear();
        self.dependents.clear();
        self.conflict_records.clear();
        self.warnings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::registry::MetadataProvider;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory index; `publish` swaps a package's release listing
    struct StaticIndex {
        packages: Mutex<HashMap<String, PackageMetadata>>,
    }

    impl StaticIndex {
        fn new(packages: Vec<PackageMetadata>) -> Arc<Self> {
            Arc::new(Self {
                packages: Mutex::new(
                    packages.into_iter().map(|m| (m.name.clone(), m)).collect(),
                ),
            })
        }

        fn publish(&self, metadata: PackageMetadata) {
            self.packages
                .lock()
                .unwrap()
                .insert(metadata.name.clone(), metadata);
        }
    }

    #[async_trait]
    impl MetadataProvider for StaticIndex {
        fn index_name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self, package: &str) -> Result<PackageMetadata, RegistryError> {
            self.packages
                .lock()
                .unwrap()
                .get(package)
                .cloned()
                .ok_or_else(|| RegistryError::package_not_found(package, self.index_name()))
        }

        async fn dependencies(
            &self,
            package: &str,
            version: &Version,
        ) -> Result<Vec<PackageSpec>, RegistryError> {
            let metadata = self.fetch(package).await?;
            Ok(metadata
                .release(version)
                .and_then(|entry| entry.dependencies.clone())
                .unwrap_or_default())
        }
    }

    fn release(version: &str, deps: &[&str]) -> ReleaseEntry {
        ReleaseEntry::new(Version::parse(version).unwrap()).with_dependencies(
            deps.iter()
                .map(|d| PackageSpec::parse(d).unwrap())
                .collect(),
        )
    }

    fn package(name: &str, releases: Vec<ReleaseEntry>) -> PackageMetadata {
        PackageMetadata::new(name, releases)
    }

    fn resolver(index: Arc<StaticIndex>) -> Resolver {
        let fetcher = ConcurrentFetcher::new(index, 4, Duration::from_secs(1));
        let config = ResolverConfig::new(PythonTarget::parse("3.11").unwrap());
        Resolver::new(fetcher, config)
    }

    fn specs(raw: &[&str]) -> Vec<PackageSpec> {
        raw.iter().map(|s| PackageSpec::parse(s).unwrap()).collect()
    }

    fn ver(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_single_package_newest() {
        let index = StaticIndex::new(vec![package(
            "requests",
            vec![release("2.28.0", &[]), release("2.31.0", &[])],
        )]);
        let mut resolver = resolver(index);

        let result = resolver.resolve(&specs(&["requests"])).await.unwrap();
        assert_eq!(result.resolved["requests"].version, ver("2.31.0"));
        assert!(result.resolved["requests"].is_direct);
        assert!(result.conflicts.is_empty());
        assert!(result.unresolved.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_transitive_dependency() {
        let index = StaticIndex::new(vec![
            package("flask", vec![release("2.3.2", &["click>=8.0"])]),
            package("click", vec![release("7.1.2", &[]), release("8.1.7", &[])]),
        ]);
        let mut resolver = resolver(index);

        let result = resolver.resolve(&specs(&["flask"])).await.unwrap();
        assert_eq!(result.resolved.len(), 2);
        assert_eq!(result.resolved["click"].version, ver("8.1.7"));
        assert!(!result.resolved["click"].is_direct);
        assert_eq!(result.resolved["click"].required_by, vec!["flask"]);
    }

    #[tokio::test]
    async fn test_late_constraint_reopens_pinned_package() {
        // c resolves to 2.0 in the first pass; b's constraint arrives a
        // pass later and forces a re-selection
        let index = StaticIndex::new(vec![
            package("a", vec![release("1.0", &["b"])]),
            package("b", vec![release("1.0", &["c<2.0"])]),
            package("c", vec![release("1.5", &[]), release("2.0", &[])]),
        ]);
        let mut resolver = resolver(index);

        let result = resolver.resolve(&specs(&["a", "c"])).await.unwrap();
        assert_eq!(result.resolved["c"].version, ver("1.5"));
        assert!(result.conflicts.is_empty());
    }

    #[tokio::test]
    async fn test_missing_package_is_contained() {
        let index = StaticIndex::new(vec![package("requests", vec![release("2.31.0", &[])])]);
        let mut resolver = resolver(index);

        let result = resolver
            .resolve(&specs(&["requests", "doesnotexist123"]))
            .await
            .unwrap();
        assert_eq!(result.resolved.len(), 1);
        assert!(result.unresolved.contains("doesnotexist123"));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("doesnotexist123")));
    }

    #[tokio::test]
    async fn test_prerelease_only_when_no_stable_fits() {
        let index = StaticIndex::new(vec![package(
            "django",
            vec![
                release("4.2.0", &[]),
                release("5.0rc1", &[]),
                release("5.0", &[]),
            ],
        )]);
        let mut newest = resolver(Arc::clone(&index));

        // A stable candidate exists, so the pre-release loses
        let result = newest.resolve(&specs(&["django"])).await.unwrap();
        assert_eq!(result.resolved["django"].version, ver("5.0"));

        // Only the pre-release fits the window
        let mut windowed = resolver(index);
        let result = windowed
            .resolve(&specs(&["django>=4.5,<5.0"]))
            .await
            .unwrap();
        assert_eq!(result.resolved["django"].version, ver("5.0rc1"));
    }

    #[tokio::test]
    async fn test_python_filter_excludes_candidates() {
        let index = StaticIndex::new(vec![PackageMetadata::new(
            "numpy",
            vec![
                ReleaseEntry::new(ver("1.24.0")).with_requires_python(">=3.8"),
                ReleaseEntry::new(ver("2.0.0")).with_requires_python(">=3.12"),
            ],
        )]);
        let fetcher = ConcurrentFetcher::new(index, 4, Duration::from_secs(1));
        let config = ResolverConfig::new(PythonTarget::parse("3.9").unwrap());
        let mut resolver = Resolver::new(fetcher, config);

        let result = resolver.resolve(&specs(&["numpy"])).await.unwrap();
        assert_eq!(result.resolved["numpy"].version, ver("1.24.0"));
    }

    #[tokio::test]
    async fn test_yanked_releases_skipped() {
        let index = StaticIndex::new(vec![PackageMetadata::new(
            "urllib3",
            vec![
                ReleaseEntry::new(ver("2.0.0")),
                ReleaseEntry::new(ver("2.0.1")).yanked(),
            ],
        )]);
        let mut resolver = resolver(index);

        let result = resolver.resolve(&specs(&["urllib3"])).await.unwrap();
        assert_eq!(result.resolved["urllib3"].version, ver("2.0.0"));
    }

    #[tokio::test]
    async fn test_prefer_lowest_picks_oldest_satisfying() {
        let index = StaticIndex::new(vec![package(
            "requests",
            vec![release("2.20.0", &[]), release("2.31.0", &[])],
        )]);
        let fetcher = ConcurrentFetcher::new(index, 4, Duration::from_secs(1));
        let config =
            ResolverConfig::new(PythonTarget::parse("3.11").unwrap()).with_prefer_lowest(true);
        let mut resolver = Resolver::new(fetcher, config);

        let result = resolver.resolve(&specs(&["requests>=2.0"])).await.unwrap();
        assert_eq!(result.resolved["requests"].version, ver("2.20.0"));
    }

    #[tokio::test]
    async fn test_cycle_guard_reports_unresolved() {
        // a and b keep demanding different pins of c; the pass bound cuts
        // the oscillation off
        let index = StaticIndex::new(vec![
            package("a", vec![release("1.0", &["c==1.0"]), release("2.0", &["c==2.0"])]),
            package("c", vec![release("1.0", &["a==2.0"]), release("2.0", &["a==1.0"])]),
        ]);
        let fetcher = ConcurrentFetcher::new(index, 4, Duration::from_secs(1));
        let config = ResolverConfig::new(PythonTarget::parse("3.11").unwrap())
            .with_max_passes(3)
            .with_strategy(ConflictStrategy::Manual);
        let mut resolver = Resolver::new(fetcher, config);

        let result = resolver.resolve(&specs(&["a", "c"])).await.unwrap();
        // Every package reached a terminal state one way or another
        for name in ["a", "c"] {
            assert!(
                result.resolved.contains_key(name) || result.unresolved.contains(name),
                "{name} left in a non-terminal state"
            );
        }
    }

    #[tokio::test]
    async fn test_second_resolve_sees_new_releases() {
        let index = StaticIndex::new(vec![package("pkg", vec![release("1.0.0", &[])])]);
        let mut resolver = resolver(Arc::clone(&index));

        let first = resolver.resolve(&specs(&["pkg"])).await.unwrap();
        assert_eq!(first.resolved["pkg"].version, ver("1.0.0"));

        index.publish(package(
            "pkg",
            vec![release("1.0.0", &[]), release("2.0.0", &[])],
        ));
        let second = resolver.resolve(&specs(&["pkg"])).await.unwrap();
        assert_eq!(second.resolved["pkg"].version, ver("2.0.0"));
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let index = StaticIndex::new(vec![
            package("flask", vec![release("2.3.2", &["click>=8.0", "werkzeug>=2.3"])]),
            package("click", vec![release("8.1.7", &[])]),
            package("werkzeug", vec![release("2.3.8", &[])]),
        ]);
        let mut resolver = resolver(index);

        let roots = specs(&["flask>=2.0"]);
        let first = resolver.resolve(&roots).await.unwrap();
        let second = resolver.resolve(&roots).await.unwrap();

        let pins = |result: &ResolutionResult| -> Vec<(String, String)> {
            result
                .packages()
                .map(|p| (p.name.clone(), p.version.as_str().to_string()))
                .collect()
        };
        assert_eq!(pins(&first), pins(&second));
        assert_eq!(first.unresolved, second.unresolved);
        assert_eq!(first.conflicts.len(), second.conflicts.len());
    }

    #[tokio::test]
    async fn test_fail_strategy_aborts_run() {
        let index = StaticIndex::new(vec![package(
            "foo",
            vec![release("0.5", &[]), release("2.5", &[])],
        )]);
        let fetcher = ConcurrentFetcher::new(index, 4, Duration::from_secs(1));
        let config = ResolverConfig::new(PythonTarget::parse("3.11").unwrap())
            .with_strategy(ConflictStrategy::Fail);
        let mut resolver = Resolver::new(fetcher, config);

        let err = resolver
            .resolve(&specs(&["foo>=2.0.0", "foo<1.0.0"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("foo"));
    }

    #[tokio::test]
    async fn test_self_dependency_is_ignored() {
        let index = StaticIndex::new(vec![package("ouro", vec![release("1.0", &["ouro>=0.5"])])]);
        let mut resolver = resolver(index);

        let result = resolver.resolve(&specs(&["ouro"])).await.unwrap();
        assert_eq!(result.resolved["ouro"].version, ver("1.0"));
        assert!(result.resolved["ouro"].required_by.is_empty());
    }
}
