//! PyPI JSON API provider
//!
//! Fetches package release metadata from PyPI.
//! API endpoints:
//! - https://pypi.org/pypi/{package}/json (release listing, plus the
//!   dependencies of the latest release)
//! - https://pypi.org/pypi/{package}/{version}/json (dependencies of one
//!   specific release)

use crate::domain::{normalize_name, PackageMetadata, PackageSpec, ReleaseEntry, Version};
use crate::error::RegistryError;
use crate::registry::{HttpClient, MetadataProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI provider
pub struct PyPiProvider {
    client: HttpClient,
    base_url: String,
}

/// PyPI project metadata response
#[derive(Debug, Deserialize)]
struct ProjectResponse {
    info: ProjectInfo,
    /// Release files keyed by version string
    #[serde(default)]
    releases: HashMap<String, Vec<ReleaseFile>>,
}

/// The `info` block; for the version endpoint it describes that version,
/// for the project endpoint it describes the latest release
#[derive(Debug, Deserialize)]
struct ProjectInfo {
    name: String,
    version: String,
    requires_dist: Option<Vec<String>>,
}

/// One uploaded file of a release
#[derive(Debug, Deserialize)]
struct ReleaseFile {
    requires_python: Option<String>,
    upload_time_iso_8601: Option<String>,
    #[serde(default)]
    yanked: bool,
}

/// Response of the per-version endpoint; the release listing is not needed
#[derive(Debug, Deserialize)]
struct VersionResponse {
    info: ProjectInfo,
}

impl PyPiProvider {
    /// Create a provider for pypi.org
    pub fn new(timeout: Duration) -> Result<Self, RegistryError> {
        Self::with_base_url(PYPI_API_URL, timeout)
    }

    /// Create a provider for a custom index exposing the PyPI JSON API
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = HttpClient::with_config(timeout, crate::registry::DEFAULT_USER_AGENT)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the URL for a package's release listing
    fn build_project_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url, package)
    }

    /// Build the URL for one release of a package
    fn build_release_url(&self, package: &str, version: &Version) -> String {
        format!("{}/{}/{}/json", self.base_url, package, version.as_str())
    }
}

#[async_trait]
impl MetadataProvider for PyPiProvider {
    fn index_name(&self) -> &'static str {
        "PyPI"
    }

    async fn fetch(&self, package: &str) -> Result<PackageMetadata, RegistryError> {
        let url = self.build_project_url(package);
        let response: ProjectResponse = self
            .client
            .get_json(&url, package, self.index_name())
            .await?;

        Ok(metadata_from_response(response))
    }

    async fn dependencies(
        &self,
        package: &str,
        version: &Version,
    ) -> Result<Vec<PackageSpec>, RegistryError> {
        let url = self.build_release_url(package, version);
        let response: VersionResponse = self
            .client
            .get_json(&url, package, self.index_name())
            .await?;

        Ok(parse_requires_dist(
            response.info.requires_dist.as_deref().unwrap_or_default(),
        ))
    }
}

/// Turns a project response into release metadata
///
/// Versions that do not parse and releases without any files are skipped.
/// The dependencies of the latest release are taken straight from the
/// `info` block; every other release reports `None` and is fetched on
/// demand.
fn metadata_from_response(response: ProjectResponse) -> PackageMetadata {
    let latest_version = Version::parse(&response.info.version).ok();
    let mut entries = Vec::new();

    for (version_str, files) in response.releases {
        let version = match Version::parse(&version_str) {
            Ok(version) => version,
            Err(_) => continue,
        };
        if files.is_empty() {
            continue;
        }

        let mut entry = ReleaseEntry::new(version);

        if let Some(marker) = files.iter().find_map(|f| f.requires_python.clone()) {
            entry = entry.with_requires_python(marker);
        }

        // Earliest upload time across the release files
        let mut earliest: Option<DateTime<Utc>> = None;
        for file in &files {
            if let Some(time_str) = &file.upload_time_iso_8601 {
                if let Ok(time) = time_str.parse::<DateTime<Utc>>() {
                    earliest = Some(match earliest {
                        Some(current) if time < current => time,
                        Some(current) => current,
                        None => time,
                    });
                }
            }
        }
        if let Some(released_at) = earliest {
            entry = entry.with_released_at(released_at);
        }

        if files.iter().all(|f| f.yanked) {
            entry = entry.yanked();
        }

        if latest_version.as_ref() == Some(&entry.version) {
            if let Some(requires_dist) = &response.info.requires_dist {
                entry = entry.with_dependencies(parse_requires_dist(requires_dist));
            }
        }

        entries.push(entry);
    }

    PackageMetadata::new(normalize_name(&response.info.name), entries)
}

/// Parses `requires_dist` entries into package specs
///
/// Requirements guarded by an `extra ==` marker and entries that do not
/// parse (URL requirements and the like) are dropped.
fn parse_requires_dist(entries: &[String]) -> Vec<PackageSpec> {
    entries
        .iter()
        .filter_map(|entry| PackageSpec::from_requirement(entry).ok().flatten())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> ProjectResponse {
        serde_json::from_str(
            r#"{
                "info": {
                    "name": "Flask",
                    "version": "2.3.2",
                    "requires_dist": [
                        "Werkzeug>=2.3.3",
                        "click>=8.1.3",
                        "importlib-metadata>=3.6.0; python_version < \"3.10\"",
                        "python-dotenv; extra == \"dotenv\""
                    ]
                },
                "releases": {
                    "2.3.2": [
                        {
                            "requires_python": ">=3.8",
                            "upload_time_iso_8601": "2023-05-01T16:02:21.618915Z",
                            "yanked": false
                        },
                        {
                            "requires_python": ">=3.8",
                            "upload_time_iso_8601": "2023-05-01T16:01:58.000000Z",
                            "yanked": false
                        }
                    ],
                    "2.3.1": [
                        {
                            "requires_python": ">=3.8",
                            "upload_time_iso_8601": "2023-04-25T12:00:00Z",
                            "yanked": true
                        }
                    ],
                    "2.2.0": [
                        {
                            "requires_python": ">=3.7",
                            "upload_time_iso_8601": "2022-08-01T10:00:00Z"
                        }
                    ],
                    "0.1-broken-tag": [
                        { "upload_time_iso_8601": "2010-01-01T00:00:00Z" }
                    ],
                    "1.0": []
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_project_url() {
        let provider = PyPiProvider::new(Duration::from_secs(10)).unwrap();
        assert_eq!(
            provider.build_project_url("requests"),
            "https://pypi.org/pypi/requests/json"
        );
    }

    #[test]
    fn test_build_release_url() {
        let provider = PyPiProvider::new(Duration::from_secs(10)).unwrap();
        let version = Version::parse("2.31.0").unwrap();
        assert_eq!(
            provider.build_release_url("requests", &version),
            "https://pypi.org/pypi/requests/2.31.0/json"
        );
    }

    #[test]
    fn test_custom_base_url_trims_slash() {
        let provider =
            PyPiProvider::with_base_url("https://mirror.example/pypi/", Duration::from_secs(10))
                .unwrap();
        assert_eq!(
            provider.build_project_url("flask"),
            "https://mirror.example/pypi/flask/json"
        );
    }

    #[test]
    fn test_metadata_skips_unparsable_and_fileless_releases() {
        let metadata = metadata_from_response(sample_response());
        let versions: Vec<&str> = metadata.versions().map(|v| v.as_str()).collect();
        assert_eq!(versions, ["2.2.0", "2.3.1", "2.3.2"]);
    }

    #[test]
    fn test_metadata_normalizes_name() {
        let metadata = metadata_from_response(sample_response());
        assert_eq!(metadata.name, "flask");
    }

    #[test]
    fn test_metadata_latest_release_has_dependencies() {
        let metadata = metadata_from_response(sample_response());

        let latest = metadata.latest().unwrap();
        assert_eq!(latest.version, Version::parse("2.3.2").unwrap());
        let deps = latest.dependencies.as_ref().unwrap();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["werkzeug", "click", "importlib-metadata"]);

        // Older releases require a separate lookup
        let older = metadata
            .release(&Version::parse("2.2.0").unwrap())
            .unwrap();
        assert!(older.dependencies.is_none());
    }

    #[test]
    fn test_metadata_earliest_upload_time() {
        let metadata = metadata_from_response(sample_response());
        let latest = metadata.latest().unwrap();
        let released_at = latest.released_at.unwrap();
        assert_eq!(released_at.to_rfc3339(), "2023-05-01T16:01:58+00:00");
    }

    #[test]
    fn test_metadata_requires_python_and_yanked() {
        let metadata = metadata_from_response(sample_response());

        let yanked = metadata
            .release(&Version::parse("2.3.1").unwrap())
            .unwrap();
        assert!(yanked.yanked);
        assert_eq!(yanked.requires_python.as_deref(), Some(">=3.8"));

        let regular = metadata
            .release(&Version::parse("2.2.0").unwrap())
            .unwrap();
        assert!(!regular.yanked);
        assert_eq!(regular.requires_python.as_deref(), Some(">=3.7"));
    }

    #[test]
    fn test_parse_requires_dist_filters() {
        let entries = vec![
            "urllib3<3,>=1.21.1".to_string(),
            "PySocks!=1.5.7,>=1.5.6; extra == \"socks\"".to_string(),
            "certifi>=2017.4.17".to_string(),
            "weird @ https://example.com/weird.whl".to_string(),
        ];
        let specs = parse_requires_dist(&entries);
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["urllib3", "certifi"]);
    }

    #[test]
    fn test_parse_requires_dist_empty() {
        assert!(parse_requires_dist(&[]).is_empty());
    }
}
