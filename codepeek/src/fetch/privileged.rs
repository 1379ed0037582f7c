//! Message-passing bridge to the privileged fetch context.
//!
//! The privileged side runs as a background task that owns its own
//! [`Fetcher`]. Callers talk to it through [`ChannelPrivilegedFetcher`],
//! sending a [`FetchUrlRequest`] and waiting for a [`FetchUrlResponse`] on a
//! oneshot channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::protocols::{Fetcher, PrivilegedFetcher};
use crate::errors::FetchError;

/// Action name of a fetch request.
pub const FETCH_URL_ACTION: &str = "fetchUrl";

/// Request message: `{"action": "fetchUrl", "url": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchUrlRequest {
    /// Requested action.
    pub action: String,
    /// Target URL.
    pub url: String,
}

impl FetchUrlRequest {
    /// Creates a fetch request.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            action: FETCH_URL_ACTION.to_string(),
            url: url.into(),
        }
    }
}

/// Reply message: `{"success": true, "html": ...}` or
/// `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchUrlResponse {
    /// Whether the fetch worked.
    pub success: bool,
    /// Page HTML on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchUrlResponse {
    /// Successful reply.
    #[must_use]
    pub fn ok(html: impl Into<String>) -> Self {
        Self {
            success: true,
            html: Some(html.into()),
            error: None,
        }
    }

    /// Failed reply.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            html: None,
            error: Some(error.into()),
        }
    }

    /// Converts the reply into the page HTML or a privileged error.
    pub fn into_result(self, url: &str) -> Result<String, FetchError> {
        match (self.success, self.html) {
            (true, Some(html)) => Ok(html),
            (true, None) => Err(FetchError::privileged(url, "empty response")),
            (false, _) => Err(FetchError::privileged(
                url,
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }
}

#[derive(Debug)]
struct PrivilegedMessage {
    request: FetchUrlRequest,
    reply: oneshot::Sender<FetchUrlResponse>,
}

/// The privileged worker.
pub struct BackgroundFetchService {
    fetcher: Arc<dyn Fetcher>,
}

impl BackgroundFetchService {
    /// Creates a service around a fetcher.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Handles one request.
    pub async fn handle(&self, request: &FetchUrlRequest) -> FetchUrlResponse {
        if request.action != FETCH_URL_ACTION {
            return FetchUrlResponse::failed(format!("Unknown action: {}", request.action));
        }

        match self.fetcher.fetch(&request.url).await {
            Ok(response) if response.is_success() => FetchUrlResponse::ok(response.text),
            Ok(response) => FetchUrlResponse::failed(format!("HTTP {}", response.status_code)),
            Err(e) => FetchUrlResponse::failed(e.to_string()),
        }
    }

    /// Spawns the worker loop and returns a client handle.
    ///
    /// Each request is served on its own task. The loop ends once every
    /// client handle is dropped.
    #[must_use]
    pub fn spawn(self, buffer: usize) -> (ChannelPrivilegedFetcher, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::channel::<PrivilegedMessage>(buffer.max(1));
        let service = Arc::new(self);

        let handle = tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let response = service.handle(&message.request).await;
                    if message.reply.send(response).is_err() {
                        tracing::debug!(url = %message.request.url, "Privileged caller went away");
                    }
                });
            }
            tracing::debug!("Privileged fetch service stopped");
        });

        (ChannelPrivilegedFetcher { sender }, handle)
    }
}

/// Client side of the privileged channel.
#[derive(Debug, Clone)]
pub struct ChannelPrivilegedFetcher {
    sender: mpsc::Sender<PrivilegedMessage>,
}

#[async_trait]
impl PrivilegedFetcher for ChannelPrivilegedFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let (reply, response) = oneshot::channel();
        let message = PrivilegedMessage {
            request: FetchUrlRequest::new(url),
            reply,
        };

        self.sender
            .send(message)
            .await
            .map_err(|_| FetchError::ChannelClosed)?;

        response
            .await
            .map_err(|_| FetchError::ChannelClosed)?
            .into_result(url)
    }
}
