//! Worker pool for payout evaluation
//!
//! Runs CPU-bound work on the blocking thread pool with at most `worker_count`
//! tasks in flight. Results come back in input order whatever order the
//! tasks finish in.

use futures::stream::{self, StreamExt, TryStreamExt};
use shared::errors::ServiceError;
use std::sync::Arc;
use tracing::{dispatcher, Span};

/// Bounded, order-preserving worker pool
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    worker_count: usize,
}

impl WorkerPool {
    /// Create a new worker pool; a count of 0 is treated as 1
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Apply `task` to every item, keeping the output aligned with `items`
    ///
    /// A task that panics fails the whole map; no partial results are returned.
    /// Tasks run inside the caller's span and log through the caller's subscriber.
    pub async fn map<T, R, F>(&self, items: Vec<T>, task: F) -> Result<Vec<R>, ServiceError>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let task = Arc::new(task);
        let span = Span::current();
        let dispatch = dispatcher::get_default(|dispatch| dispatch.clone());

        tracing::debug!(
            items = items.len(),
            worker_count = self.worker_count,
            "Dispatching tasks to worker pool"
        );

        stream::iter(items.into_iter().map(|item| {
            let task = task.clone();
            let span = span.clone();
            let dispatch = dispatch.clone();
            tokio::task::spawn_blocking(move || {
                dispatcher::with_default(&dispatch, || span.in_scope(|| task(item)))
            })
        }))
        .buffered(self.worker_count)
        .map_err(ServiceError::evaluation_failed)
        .try_collect()
        .await
    }
}
