//! Per-attempt download error.

use thiserror::Error;

use crate::transfer::TransferError;

/// Error from one download attempt (fetch or persist). Both classes are
/// retried alike; the split exists for display and logging only.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Transfer primitive failed or the endpoint returned a non-success status.
    #[error("{0}")]
    Transfer(#[from] TransferError),
    /// Sink write failed (disk full, permission denied, ...).
    #[error("storage: {0}")]
    Persist(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_error_displays_unwrapped() {
        let e = DownloadError::Transfer(TransferError::Http(404));
        assert_eq!(e.to_string(), "HTTP 404");
    }

    #[test]
    fn persist_error_displays_with_prefix() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = DownloadError::Persist(io);
        assert_eq!(e.to_string(), "storage: denied");
    }
}
