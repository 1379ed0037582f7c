//! Remote proxy configuration.

use serde::Deserialize;

use super::protocols::Fetcher;
use crate::config::DEFAULT_PROXY_URL;

/// Remote document shape: `{"corsProxyUrl": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProxyConfig {
    /// Primary proxy base URL.
    #[serde(default, alias = "proxyUrl")]
    pub cors_proxy_url: Option<String>,
}

impl RemoteProxyConfig {
    /// Parses the document. Returns `None` when it is malformed or names no proxy.
    #[must_use]
    pub fn parse(raw: &str) -> Option<String> {
        serde_json::from_str::<Self>(raw)
            .ok()?
            .cors_proxy_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }
}

/// Fetches the primary proxy base URL from `config_url`.
///
/// Never fails: an unreachable, malformed or empty document yields
/// [`DEFAULT_PROXY_URL`].
pub async fn load_proxy_config(fetcher: &dyn Fetcher, config_url: &str) -> String {
    let proxy = match fetcher.fetch(config_url).await {
        Ok(response) if response.is_success() => RemoteProxyConfig::parse(&response.text),
        Ok(response) => {
            tracing::debug!(url = %config_url, status = response.status_code, "Proxy config unavailable");
            None
        }
        Err(e) => {
            tracing::debug!(url = %config_url, error = %e, "Proxy config unreachable");
            None
        }
    };

    proxy.unwrap_or_else(|| {
        tracing::debug!(proxy = DEFAULT_PROXY_URL, "Using default proxy");
        DEFAULT_PROXY_URL.to_string()
    })
}
