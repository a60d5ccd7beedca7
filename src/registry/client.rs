//! HTTP client shared foundation
//!
//! This module provides a thin wrapper over reqwest with:
//! - Configurable timeout and User-Agent
//! - Status code mapping into RegistryError
//!
//! Every call is a single attempt. Retries and backoff live in the fetch
//! pool, which also coalesces duplicate requests, so retrying here as well
//! would multiply the attempt budget.

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for index requests (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("pipsolve/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with error mapping
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::NetworkError {
                package: String::new(),
                registry: "HTTP client".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request, mapping error statuses to RegistryError
    pub async fn get(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    return Err(RegistryError::timeout(package, registry));
                }
                return Err(RegistryError::network_error(package, registry, e.to_string()));
            }
        };

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RegistryError::rate_limit_exceeded(registry));
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::package_not_found(package, registry));
        }

        if !response.status().is_success() {
            return Err(RegistryError::network_error(
                package,
                registry,
                format!("HTTP {}", response.status()),
            ));
        }

        Ok(response)
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get(url, package, registry).await?;

        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(package, registry, format!("failed to parse JSON: {}", e))
        })
    }
}
