//! Concurrent resolution pipeline.
//!
//! Input lines flow through the dispatcher into a bounded queue, a fixed pool
//! of workers drains the queue through the DNS engine, and resolved names are
//! written to a shared line-atomic sink:
//!
//! ```text
//! input ─▶ dispatch ─▶ queue ─▶ worker × N ─▶ resolve_cname ─▶ OutputSink
//! ```
//!
//! The run ends only once the dispatcher has closed the queue and the
//! [`CompletionBarrier`] has seen every worker exit. Output order across
//! workers is unspecified.

mod barrier;
mod dispatcher;
mod output;
mod worker;

use std::sync::Arc;

use log::{info, warn};
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::{mpsc, Mutex};

use crate::dns::CnameLookup;
use crate::error_handling::LookupStats;
use crate::resolvers::ResolverPool;

// Re-export public API
pub use barrier::CompletionBarrier;
pub use dispatcher::{dispatch, normalize_domain, WorkItem};
pub use output::{CnameResult, OutputSink};
pub use worker::{run_worker, SharedQueue, WorkerContext};

/// Runs the whole pipeline over `input` and returns the number of domains
/// dispatched.
///
/// `workers` must be at least one; it is clamped otherwise. The queue holds
/// one pending item per worker, so the dispatcher blocks once every worker
/// is busy and a full backlog is waiting.
///
/// The sink is flushed before returning.
pub async fn run_pipeline<R, W, E, G>(
    input: R,
    pool: &ResolverPool,
    rng: &mut G,
    engine: Arc<E>,
    sink: Arc<OutputSink<W>>,
    stats: Arc<LookupStats>,
    workers: usize,
) -> usize
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    E: CnameLookup + ?Sized + 'static,
    G: Rng + ?Sized,
{
    let workers = workers.max(1);
    let (tx, rx) = mpsc::channel::<WorkItem>(workers);
    let ctx = WorkerContext {
        queue: Arc::new(Mutex::new(rx)),
        engine,
        sink: Arc::clone(&sink),
        stats: Arc::clone(&stats),
    };

    let barrier = CompletionBarrier::new();
    for _ in 0..workers {
        barrier.spawn(run_worker(ctx.clone()));
    }
    drop(ctx);
    info!("Started {} workers over {} resolvers", workers, pool.len());

    let dispatched = dispatch(input, pool, rng, tx, &stats).await;
    info!("Input exhausted after {dispatched} domains, waiting for workers to drain");

    barrier.wait().await;

    if let Err(e) = sink.flush().await {
        warn!("Failed to flush output: {e}");
    }
    dispatched
}
