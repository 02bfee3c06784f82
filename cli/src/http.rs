//! Fetching foreign pages over HTTP.

use std::time::Duration;

use bitext::{DocumentFetcher, Error, Result};
use tokio::runtime::Runtime;

/// Fetcher for `http` and `https` locations.
///
/// Requests run on a private Tokio runtime, so `fetch` must not be called
/// from inside another runtime.
pub struct HttpFetcher {
    client: reqwest::Client,
    runtime: Runtime,
}

impl HttpFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bitext/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Other(format!("HTTP client: {}", e)))?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self { client, runtime })
    }

    async fn get(&self, location: &str) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(location)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl DocumentFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    fn schemes(&self) -> &[&str] {
        &["http", "https"]
    }

    fn fetch(&self, location: &str) -> Result<String> {
        log::debug!("GET {}", location);
        self.runtime
            .block_on(self.get(location))
            .map_err(|e| Error::unavailable(location, e))
    }
}
