//! Transfer capability: fetch bytes from a URL.
//!
//! The orchestrator treats transport as an injected primitive so tests (and
//! alternative backends) can substitute their own. `HttpTransfer` is the
//! default, backed by reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Error from one fetch. Displayed verbatim in a request's `error` field,
/// so an HTTP failure reads exactly `HTTP {code}`.
#[derive(Debug, Clone, Error)]
pub enum TransferError {
    /// Remote endpoint returned a non-success status.
    #[error("HTTP {0}")]
    Http(u16),
    /// The network call itself failed (DNS, connect, read, ...).
    #[error("{0}")]
    Network(String),
}

/// Capability to fetch the full body of a remote resource.
#[async_trait]
pub trait Transfer: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, TransferError>;
}

/// Default transfer over HTTP GET.
#[derive(Debug, Clone, Default)]
pub struct HttpTransfer {
    client: reqwest::Client,
}

impl HttpTransfer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transfer for HttpTransfer {
    async fn fetch(&self, url: &str) -> Result<Bytes, TransferError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Http(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))
    }
}
