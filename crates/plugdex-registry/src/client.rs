// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for package registry metadata.
//!
//! Provides [`HttpRegistry`], which issues one `GET {registry}/{package}` per
//! call with a fixed timeout and no retries. HTTP 404 is reported as
//! [`PlugdexError::PackageNotFound`]; every other failure is a
//! [`PlugdexError::Registry`].

use std::time::Duration;

use async_trait::async_trait;
use plugdex_config::model::RegistryConfig;
use plugdex_core::{PackageMetadata, PackageSource, PlugdexError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use tracing::debug;

/// User agent sent with every registry request.
const USER_AGENT: &str = concat!("plugdex/", env!("CARGO_PKG_VERSION"));

/// Registry metadata client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::Client,
}

impl HttpRegistry {
    /// Creates a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, PlugdexError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| PlugdexError::Registry {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client })
    }

    /// Creates a client from the `[registry]` config section.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, PlugdexError> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }
}

/// Metadata URL for `package` on `registry`. Trailing slashes on the base are dropped.
pub fn package_url(registry: &str, package: &str) -> String {
    format!("{}/{}", registry.trim_end_matches('/'), package)
}

#[async_trait]
impl PackageSource for HttpRegistry {
    async fn fetch_package(
        &self,
        registry: &str,
        package: &str,
    ) -> Result<PackageMetadata, PlugdexError> {
        let url = package_url(registry, package);

        let response = self.client.get(&url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request to {url} timed out")
            } else {
                format!("request to {url} failed: {e}")
            };
            PlugdexError::Registry {
                message,
                source: Some(Box::new(e)),
            }
        })?;

        let status = response.status();
        debug!(%url, status = %status, "registry response received");

        if status == StatusCode::NOT_FOUND {
            return Err(PlugdexError::PackageNotFound {
                package: package.to_string(),
            });
        }
        if !status.is_success() {
            return Err(PlugdexError::Registry {
                message: format!("{url} returned {status}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| PlugdexError::Registry {
            message: format!("failed to read response body from {url}: {e}"),
            source: Some(Box::new(e)),
        })?;

        serde_json::from_str(&body).map_err(|e| PlugdexError::Registry {
            message: format!("malformed metadata from {url}: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> HttpRegistry {
        HttpRegistry::new(Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn package_url_trims_trailing_slash() {
        assert_eq!(
            package_url("https://registry.npmjs.org/", "weather"),
            "https://registry.npmjs.org/weather"
        );
        assert_eq!(
            package_url("https://registry.npmjs.org", "@astro/weather"),
            "https://registry.npmjs.org/@astro/weather"
        );
    }

    #[tokio::test]
    async fn fetch_package_success() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "name": "weather",
            "dist-tags": {"latest": "1.0.0"},
            "versions": {"1.0.0": {"dist": {"shasum": "abc"}}}
        });

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let meta = test_client()
            .fetch_package(&format!("{}/", server.uri()), "weather")
            .await
            .unwrap();
        assert_eq!(meta.latest_tag(), Some("1.0.0"));
        assert!(meta.versions.contains_key("1.0.0"));
    }

    #[tokio::test]
    async fn fetch_package_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_client()
            .fetch_package(&server.uri(), "ghost")
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_package_500_is_registry_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client()
            .fetch_package(&server.uri(), "flaky")
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("500"), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_package_malformed_body_is_registry_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = test_client()
            .fetch_package(&server.uri(), "garbled")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("malformed metadata"), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_package_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpRegistry::new(Duration::from_millis(100)).unwrap();
        let err = client.fetch_package(&server.uri(), "slow").await.unwrap_err();
        assert!(err.to_string().contains("timed out"), "got: {err}");
    }
}
