//! Progress snapshots and the observer capability.
//!
//! A snapshot is a frozen value copy: mutating a delivered snapshot never
//! affects orchestrator state, and vice versa.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::request::{DownloadRequest, RequestStatus};

/// Aggregate batch state carried in every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Entries constructed, no worker started yet.
    Idle,
    /// Workers running.
    Running,
    /// Worker pool joined; all entries terminal.
    Completed,
}

/// Point-in-time copy of aggregate and per-entry state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total: usize,
    /// Entries in a terminal state (`successes + failures`).
    pub completed: usize,
    pub successes: usize,
    pub failures: usize,
    /// Value copies of every entry, in input order.
    pub entries: Vec<DownloadRequest>,
    pub status: BatchStatus,
}

/// Capability for receiving progress snapshots. A missing observer is a
/// no-op at the orchestrator level, never an error.
#[async_trait]
pub trait ProgressObserver: Send + Sync {
    async fn on_snapshot(&self, snapshot: ProgressSnapshot);
}

/// Observer that discards every snapshot.
#[derive(Debug, Default)]
pub struct NoopObserver;

#[async_trait]
impl ProgressObserver for NoopObserver {
    async fn on_snapshot(&self, _snapshot: ProgressSnapshot) {}
}

/// Computes a snapshot from the live entries list.
pub fn snapshot_of(entries: &[DownloadRequest], status: BatchStatus) -> ProgressSnapshot {
    let successes = entries
        .iter()
        .filter(|r| r.status == RequestStatus::Success)
        .count();
    let failures = entries
        .iter()
        .filter(|r| r.status == RequestStatus::Failed)
        .count();
    ProgressSnapshot {
        total: entries.len(),
        completed: successes + failures,
        successes,
        failures,
        entries: entries.to_vec(),
        status,
    }
}
