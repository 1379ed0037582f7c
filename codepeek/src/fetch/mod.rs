//! Page fetching with fallbacks.
//!
//! [`FetchResolver`] is the entry point. Transports plug in through the
//! [`Fetcher`] and [`PrivilegedFetcher`] traits; [`HttpFetcher`] is the
//! default transport when the `http` feature is enabled.

#[cfg(feature = "http")]
mod http;
mod privileged;
mod protocols;
mod proxy_config;
mod resolver;

#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use privileged::{
    BackgroundFetchService, ChannelPrivilegedFetcher, FetchUrlRequest, FetchUrlResponse,
    FETCH_URL_ACTION,
};
pub use protocols::{
    FetchObserver, FetchResponse, FetchStep, Fetcher, NoOpFetchObserver, PrivilegedFetcher,
};
pub use proxy_config::{load_proxy_config, RemoteProxyConfig};
pub use resolver::{proxied_url, strip_fragment, FetchResolver};

#[cfg(test)]
pub(crate) use protocols::{MockFetcher, MockPrivilegedFetcher};
