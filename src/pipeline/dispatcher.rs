//! Job dispatcher: turns input lines into work items.

use std::net::SocketAddr;

use log::warn;
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::error_handling::LookupStats;
use crate::resolvers::ResolverPool;

/// One domain to look up against one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Normalized domain (trimmed, lower-cased)
    pub domain: String,
    /// Resolver picked for this item
    pub server: SocketAddr,
}

/// Normalizes one input line into a domain.
///
/// Surrounding whitespace (including a `\r` from CRLF input) is removed and
/// the result lower-cased. Returns `None` for blank lines.
pub fn normalize_domain(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Reads `input` to the end, publishing one [`WorkItem`] per non-blank line.
///
/// Each item gets a freshly picked server. Sending waits while the queue is
/// full. The queue is closed when this function returns (the sender is
/// dropped), either at end of input, on a read error, or when every worker
/// has gone away.
///
/// Invalid UTF-8 is replaced rather than rejected, so a stray byte costs at
/// most the one line it appears in.
///
/// Returns the number of items published.
pub async fn dispatch<R, G>(
    input: R,
    pool: &ResolverPool,
    rng: &mut G,
    queue: mpsc::Sender<WorkItem>,
    stats: &LookupStats,
) -> usize
where
    R: AsyncBufRead + Unpin,
    G: Rng + ?Sized,
{
    let mut segments = input.split(b'\n');
    let mut published = 0usize;

    loop {
        let segment = match segments.next_segment().await {
            Ok(Some(segment)) => segment,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read domain from input, stopping dispatch: {e}");
                break;
            }
        };

        let Some(domain) = normalize_domain(&String::from_utf8_lossy(&segment)) else {
            continue;
        };

        let item = WorkItem {
            domain,
            server: pool.pick(rng),
        };
        if queue.send(item).await.is_err() {
            warn!("All workers exited before input was exhausted");
            break;
        }
        published += 1;
        stats.record_dispatched();
    }

    published
}
