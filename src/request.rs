//! The per-URL request record and its lifecycle states.

use serde::{Deserialize, Serialize};

use crate::id::IdGenerator;
use crate::url_model::infer_filename;

/// Lifecycle state of one request. Transitions are monotonic:
/// pending → downloading → (success | failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Downloading,
    Success,
    Failed,
}

impl RequestStatus {
    /// True for `Success` and `Failed`; no further transitions occur.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Success | RequestStatus::Failed)
    }
}

/// Mutable record tracking one URL's transfer lifecycle within a batch.
///
/// Owned exclusively by the orchestrator; observers only ever see value
/// copies inside progress snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Opaque unique token.
    pub id: String,
    pub url: String,
    /// Local filename inferred from the URL (or synthesized).
    pub filename: String,
    pub status: RequestStatus,
    /// Transfer attempts made so far (0 until the first attempt starts).
    pub attempts: u32,
    /// Last failure message, if any attempt failed.
    pub error: Option<String>,
}

/// Builds one request per URL, preserving input order. Malformed URLs do not
/// abort construction; their filenames fall back to the synthesized name.
pub fn build_requests(urls: &[String], ids: &dyn IdGenerator) -> Vec<DownloadRequest> {
    urls.iter()
        .enumerate()
        .map(|(index, url)| DownloadRequest {
            id: ids.next_id(),
            url: url.clone(),
            filename: infer_filename(url, index),
            status: RequestStatus::Pending,
            attempts: 0,
            error: None,
        })
        .collect()
}
