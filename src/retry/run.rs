//! Retry loop: drive one request to a terminal state.

use tracing::debug;

use crate::request::{DownloadRequest, RequestStatus};
use crate::storage::Sink;
use crate::transfer::Transfer;

use super::error::DownloadError;
use super::policy::BackoffPolicy;

/// Runs transfer attempts for `req` until success or the policy is exhausted,
/// sleeping the backoff delay between attempts. On exit `req.status` is
/// terminal, `req.attempts` counts the attempts made, and `req.error` holds
/// the last failure message (cleared on success).
pub async fn drive_to_terminal(
    req: &mut DownloadRequest,
    policy: &BackoffPolicy,
    transfer: &dyn Transfer,
    sink: &dyn Sink,
) {
    let total = policy.total_attempts();
    for attempt in 1..=total {
        req.attempts = attempt;
        match attempt_once(req, transfer, sink).await {
            Ok(()) => {
                req.status = RequestStatus::Success;
                req.error = None;
                debug!(url = %req.url, attempt, "download succeeded");
                return;
            }
            Err(e) => {
                debug!(url = %req.url, attempt, error = %e, "download attempt failed");
                req.error = Some(e.to_string());
                if attempt < total {
                    tokio::time::sleep(policy.delay_for(attempt)).await;
                }
            }
        }
    }

    req.status = RequestStatus::Failed;
    if req.error.is_none() {
        req.error = Some("unknown download error".to_string());
    }
}

async fn attempt_once(
    req: &DownloadRequest,
    transfer: &dyn Transfer,
    sink: &dyn Sink,
) -> Result<(), DownloadError> {
    let bytes = transfer.fetch(&req.url).await?;
    sink.persist(&req.filename, &bytes).await?;
    Ok(())
}
