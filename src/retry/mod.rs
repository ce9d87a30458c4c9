//! Retry and backoff.
//!
//! Drives one request through its transfer attempts with exponential backoff
//! until it reaches a terminal state. Transfer and persistence failures are
//! treated identically: both feed the same loop and the same backoff.

mod error;
mod policy;
mod run;

pub use error::DownloadError;
pub use policy::BackoffPolicy;
pub use run::drive_to_terminal;
