//! Package index access
//!
//! This module provides:
//! - HTTP client shared foundation
//! - PyPI JSON API provider
//! - The MetadataProvider trait the resolver fetches through

mod client;
mod pypi;

pub use client::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use pypi::PyPiProvider;

use crate::domain::{PackageMetadata, PackageSpec, Version};
use crate::error::RegistryError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Trait for package index providers
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Get the index name, used in errors and output
    fn index_name(&self) -> &'static str;

    /// Fetch the release listing for a package
    ///
    /// Release entries carry their dependency specs when the index
    /// response included them; the rest answer through `dependencies`.
    async fn fetch(&self, package: &str) -> Result<PackageMetadata, RegistryError>;

    /// Fetch the direct dependencies of one release
    async fn dependencies(
        &self,
        package: &str,
        version: &Version,
    ) -> Result<Vec<PackageSpec>, RegistryError>;
}

/// Create a metadata provider for the given index URL
///
/// `None` selects pypi.org; a custom URL must expose the same JSON API.
pub fn create_provider(
    index_url: Option<&str>,
    timeout: Duration,
) -> Result<Arc<dyn MetadataProvider>, RegistryError> {
    let provider = match index_url {
        Some(url) => PyPiProvider::with_base_url(url, timeout)?,
        None => PyPiProvider::new(timeout)?,
    };
    Ok(Arc::new(provider))
}
