//! Completion barrier for the worker pool.

use std::future::Future;

use tokio_util::task::TaskTracker;

/// Tracks live workers and blocks until all of them have exited.
///
/// Every spawned worker counts as one; the count drops when the worker's
/// future completes (or panics). `wait` closes the barrier to new workers
/// and returns once the count reaches zero.
#[derive(Default)]
pub struct CompletionBarrier {
    tracker: TaskTracker,
}

impl CompletionBarrier {
    /// Creates an open barrier with no workers.
    pub fn new() -> Self {
        Self {
            tracker: TaskTracker::new(),
        }
    }

    /// Spawns a worker on the runtime and counts it.
    pub fn spawn<F>(&self, worker: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(worker);
    }

    /// Waits for every worker to exit.
    pub async fn wait(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
