//! `reqwest`-backed [`Fetcher`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Instant;

use super::protocols::{FetchResponse, Fetcher};
use crate::config::FetchConfig;
use crate::errors::{CodepeekError, FetchError, Result};

/// HTTP transport used for direct and proxied requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_seconds: f64,
}

impl HttpFetcher {
    /// Builds a client from the fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| CodepeekError::Config(format!("header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| CodepeekError::Config(format!("header value for '{key}': {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| CodepeekError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client, timeout_seconds: f64) -> Self {
        Self {
            client,
            timeout_seconds,
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchResponse, FetchError> {
        let start = Instant::now();
        tracing::trace!(url = %url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout_seconds: self.timeout_seconds,
                }
            } else {
                FetchError::network(url, e.to_string())
            }
        })?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::network(url, e.to_string()))?;

        Ok(FetchResponse {
            status_code,
            text,
            final_url,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
