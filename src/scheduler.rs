//! Worker pool over a shared FIFO queue.
//!
//! Spawns exactly `concurrency` workers; each loops popping the queue head,
//! marking the entry downloading, running the retry engine, and writing the
//! terminal record back. One mutex guards entries and queue together, and
//! snapshots are built and delivered under that lock, so pop-and-mark is
//! atomic and observers see `completed` monotonically non-decreasing.
//!
//! The retry engine runs on a worker-local copy of the entry; the shared
//! entry is rewritten only at the terminal transition, so it is never
//! observed mid-attempt as anything but downloading.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::debug;

use crate::progress::{snapshot_of, BatchStatus, ProgressObserver};
use crate::request::{DownloadRequest, RequestStatus};
use crate::retry::{drive_to_terminal, BackoffPolicy};
use crate::storage::Sink;
use crate::transfer::Transfer;

/// Shared state for one batch: the live entries plus the dispatch queue of
/// entry indices (FIFO, input order).
pub(crate) struct BatchState {
    pub entries: Vec<DownloadRequest>,
    queue: VecDeque<usize>,
}

impl BatchState {
    pub fn new(entries: Vec<DownloadRequest>) -> Self {
        let queue = (0..entries.len()).collect();
        Self { entries, queue }
    }
}

/// Runs the pool to completion. Returns the join error message of the first
/// worker that panicked, if any.
pub(crate) async fn run_pool(
    state: Arc<Mutex<BatchState>>,
    concurrency: usize,
    policy: BackoffPolicy,
    transfer: Arc<dyn Transfer>,
    sink: Arc<dyn Sink>,
    observer: Option<Arc<dyn ProgressObserver>>,
) -> Result<(), String> {
    let mut join_set = JoinSet::new();
    for worker in 0..concurrency {
        join_set.spawn(worker_loop(
            worker,
            Arc::clone(&state),
            policy,
            Arc::clone(&transfer),
            Arc::clone(&sink),
            observer.clone(),
        ));
    }

    while let Some(res) = join_set.join_next().await {
        res.map_err(|e| e.to_string())?;
    }
    Ok(())
}

async fn worker_loop(
    worker: usize,
    state: Arc<Mutex<BatchState>>,
    policy: BackoffPolicy,
    transfer: Arc<dyn Transfer>,
    sink: Arc<dyn Sink>,
    observer: Option<Arc<dyn ProgressObserver>>,
) {
    loop {
        // Pop-and-mark under the lock; a worker finding the queue empty is
        // done (extra workers beyond the queue length exit immediately).
        let (index, mut req) = {
            let mut s = state.lock().await;
            let Some(index) = s.queue.pop_front() else {
                break;
            };
            s.entries[index].status = RequestStatus::Downloading;
            if let Some(obs) = &observer {
                obs.on_snapshot(snapshot_of(&s.entries, BatchStatus::Running))
                    .await;
            }
            (index, s.entries[index].clone())
        };

        debug!(worker, url = %req.url, "dispatching download");
        drive_to_terminal(&mut req, &policy, transfer.as_ref(), sink.as_ref()).await;
        debug!(worker, url = %req.url, status = ?req.status, attempts = req.attempts, "download finished");

        let mut s = state.lock().await;
        s.entries[index] = req;
        if let Some(obs) = &observer {
            obs.on_snapshot(snapshot_of(&s.entries, BatchStatus::Running))
                .await;
        }
    }
}
