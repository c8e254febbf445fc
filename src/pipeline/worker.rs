//! Worker loop.

use std::sync::Arc;

use tokio::io::AsyncWrite;
use tokio::sync::{mpsc, Mutex};

use crate::dns::CnameLookup;
use crate::error_handling::LookupStats;

use super::dispatcher::WorkItem;
use super::output::{CnameResult, OutputSink};

/// Receiving end of the work queue, shared by every worker.
pub type SharedQueue = Arc<Mutex<mpsc::Receiver<WorkItem>>>;

/// Everything one worker needs, cloned per worker.
pub struct WorkerContext<E: ?Sized, W> {
    /// Shared work queue
    pub queue: SharedQueue,
    /// Lookup engine
    pub engine: Arc<E>,
    /// Output for resolved names
    pub sink: Arc<OutputSink<W>>,
    /// Success and failure counters
    pub stats: Arc<LookupStats>,
}

impl<E: ?Sized, W> Clone for WorkerContext<E, W> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            engine: Arc::clone(&self.engine),
            sink: Arc::clone(&self.sink),
            stats: Arc::clone(&self.stats),
        }
    }
}

/// Consumes work items until the queue is closed and drained.
///
/// Failed lookups are counted and otherwise dropped: no output, no log.
pub async fn run_worker<E, W>(ctx: WorkerContext<E, W>)
where
    E: CnameLookup + ?Sized,
    W: AsyncWrite + Unpin + Send,
{
    loop {
        // Lock only for the dequeue so lookups run in parallel
        let item = { ctx.queue.lock().await.recv().await };
        let Some(item) = item else {
            break;
        };

        match ctx.engine.resolve_cname(&item.domain, item.server).await {
            Ok(target) => {
                ctx.stats.record_resolved();
                ctx.sink.emit(&CnameResult::new(&target, item.domain)).await;
            }
            Err(e) => ctx.stats.record_failure(e.kind()),
        }
    }
}
