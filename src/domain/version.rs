//! Package version representation and ordering
//!
//! Handles the version formats published on PyPI:
//! - Release segments: `1.2.3`, `2024.1`, `0.1`
//! - Pre-releases: `1.0a1`, `2.0.0b2`, `3.0rc1`, `1.0.dev3`
//! - Post-releases: `1.0.post1`
//! - Local labels: `1.0+cpu`
//!
//! Ordering pads release segments with zeros (`1.0` equals `1.0.0`) and ranks
//! dev < alpha < beta < rc < final < post. Local labels only break ties.

use crate::error::SpecError;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Release segments, optional pre tag, optional post tag, optional local label.
// Tag aliases and separators follow what PyPI accepts in practice.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+(?:\.\d+)*)(?:[._-]?(dev|alpha|beta|preview|pre|rc|a|b|c)[._-]?(\d*))?(?:[._-]?(?:post|rev|r)(\d*)|-(\d+))?(?:\+([a-z0-9]+(?:[._-][a-z0-9]+)*))?$",
    )
    .unwrap()
});

/// Pre-release stage, ordered from earliest to latest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreKind {
    Dev,
    Alpha,
    Beta,
    Rc,
}

impl PreKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "dev" => PreKind::Dev,
            "a" | "alpha" => PreKind::Alpha,
            "b" | "beta" => PreKind::Beta,
            // "c", "pre" and "preview" are historical spellings of rc
            _ => PreKind::Rc,
        }
    }
}

/// Pre-release marker: stage plus sequence number (`a1` is `Alpha` / 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    pub kind: PreKind,
    pub number: u64,
}

/// A parsed package version
///
/// Equality and ordering go through the parsed segments, so `1.0` and
/// `1.0.0` compare equal while `Display` preserves the original text.
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
    pre: Option<PreRelease>,
    post: Option<u64>,
    local: Option<String>,
    raw: String,
}

impl Version {
    /// Parses a version string, accepting the usual PyPI spellings
    /// (`1.0`, `v2.1.3`, `1.0a1`, `1.0.post1`, `1.0+cu118`)
    pub fn parse(input: &str) -> Result<Self, SpecError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SpecError::invalid_version(input, "empty version"));
        }

        let lowered = trimmed.to_lowercase();
        let normalized = lowered.strip_prefix('v').unwrap_or(&lowered);

        let caps = VERSION_RE
            .captures(normalized)
            .ok_or_else(|| SpecError::invalid_version(trimmed, "unrecognized version format"))?;

        let mut release = Vec::new();
        for segment in caps[1].split('.') {
            let value = segment
                .parse::<u64>()
                .map_err(|_| SpecError::invalid_version(trimmed, "release segment too large"))?;
            release.push(value);
        }

        let pre = match caps.get(2) {
            Some(tag) => Some(PreRelease {
                kind: PreKind::from_tag(tag.as_str()),
                number: parse_tag_number(trimmed, caps.get(3).map(|m| m.as_str()))?,
            }),
            None => None,
        };

        // Group 4 is the spelled-out post tag, group 5 the bare `-N` form
        let post = match (caps.get(4), caps.get(5)) {
            (Some(n), _) => Some(parse_tag_number(trimmed, Some(n.as_str()))?),
            (None, Some(n)) => Some(parse_tag_number(trimmed, Some(n.as_str()))?),
            (None, None) => None,
        };

        let local = caps
            .get(6)
            .map(|m| m.as_str().replace(['-', '_'], "."));

        Ok(Version {
            release,
            pre,
            post,
            local,
            raw: trimmed.to_string(),
        })
    }

    /// The numeric release segments (`1.2.3` gives `[1, 2, 3]`)
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// True for dev, alpha, beta and rc versions
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// The local label after `+`, if any, with separators normalized to `.`
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// The original text this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Version equality that disregards the local label, so `1.2.3+cpu`
    /// still satisfies `==1.2.3`
    pub fn eq_ignoring_local(&self, other: &Self) -> bool {
        self.cmp_release(other) == Ordering::Equal
            && self.pre == other.pre
            && self.post == other.post
    }

    /// Whether the release segments start with `prefix`, padding missing
    /// segments with zeros (`2.0` starts with `[2, 0, 0]`)
    pub fn release_starts_with(&self, prefix: &[u64]) -> bool {
        prefix
            .iter()
            .enumerate()
            .all(|(i, expected)| self.release.get(i).copied().unwrap_or(0) == *expected)
    }

    fn cmp_release(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            let a = self.release.get(i).copied().unwrap_or(0);
            let b = other.release.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    // Pre-releases sort below the final release of the same number
    fn pre_key(&self) -> (u8, Option<PreRelease>) {
        match self.pre {
            Some(p) => (0, Some(p)),
            None => (1, None),
        }
    }
}

fn parse_tag_number(input: &str, digits: Option<&str>) -> Result<u64, SpecError> {
    match digits {
        None | Some("") => Ok(0),
        Some(d) => d
            .parse::<u64>()
            .map_err(|_| SpecError::invalid_version(input, "tag number too large")),
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_release(other)
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for Version {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
