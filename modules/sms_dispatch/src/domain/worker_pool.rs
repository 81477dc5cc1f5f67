use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn, Instrument};

/// Bounded pool for background work: delayed send tails and publish observers.
///
/// Tasks are spawned right away but run at most `size` at a time. Every task
/// is tracked so shutdown can wait for the pool to drain.
#[derive(Clone)]
pub struct WorkerPool {
    tracker: TaskTracker,
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        Self {
            tracker: TaskTracker::new(),
            permits: Arc::new(Semaphore::new(size.max(1))),
        }
    }

    /// Run `fut` in the background within the caller's span.
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permits = self.permits.clone();
        self.tracker.spawn(
            async move {
                // the semaphore is never closed
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                fut.await;
            }
            .in_current_span(),
        );
    }

    /// Number of tasks not yet finished.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every task spawned so far has finished, up to `timeout`.
    ///
    /// Returns `false` when the deadline passed first. The pool keeps
    /// accepting work afterwards.
    pub async fn flush(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let drained = tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();

        if drained {
            debug!("worker pool drained");
        } else {
            warn!(pending = self.tracker.len(), "worker pool flush timed out");
        }
        drained
    }
}
