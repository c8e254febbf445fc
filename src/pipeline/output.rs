//! Result formatting and the shared output sink.

use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{Mutex, MutexGuard};

/// A resolved CNAME paired with the domain that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnameResult {
    /// Canonical name without the trailing root label
    pub target: String,
    /// Domain as read from input (trimmed, lower-cased)
    pub source_domain: String,
}

impl CnameResult {
    /// Builds a result from the raw, dot-terminated target returned by a lookup.
    pub fn new(raw_target: &str, source_domain: impl Into<String>) -> Self {
        let target = raw_target.strip_suffix('.').unwrap_or(raw_target);
        Self {
            target: target.to_string(),
            source_domain: source_domain.into(),
        }
    }

    /// Formats the output line, without the newline.
    ///
    /// `target` in default mode, `target,source_domain` in verbose mode.
    pub fn render(&self, verbose: bool) -> String {
        if verbose {
            format!("{},{}", self.target, self.source_domain)
        } else {
            self.target.clone()
        }
    }
}

/// Line-atomic writer shared by all workers.
///
/// Each result is written with a single `write_all` while holding the lock,
/// so lines from different workers never interleave. After the first write
/// error (typically a closed pipe) further results are discarded and only
/// that first failure is logged.
pub struct OutputSink<W> {
    writer: Mutex<W>,
    verbose: bool,
    broken: AtomicBool,
}

impl<W: AsyncWrite + Unpin + Send> OutputSink<W> {
    /// Wraps `writer`; `verbose` selects the `target,source_domain` format.
    pub fn new(writer: W, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            verbose,
            broken: AtomicBool::new(false),
        }
    }

    /// Writes one result line.
    pub async fn emit(&self, result: &CnameResult) {
        if self.broken.load(Ordering::Relaxed) {
            return;
        }

        let mut line = result.render(self.verbose);
        line.push('\n');

        let mut writer = self.writer.lock().await;
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            if !self.broken.swap(true, Ordering::Relaxed) {
                warn!("Failed to write result, discarding further output: {e}");
            }
        }
    }

    /// Flushes buffered output.
    pub async fn flush(&self) -> std::io::Result<()> {
        if self.broken.load(Ordering::Relaxed) {
            return Ok(());
        }
        self.writer.lock().await.flush().await
    }

    /// Locks and returns the underlying writer.
    pub async fn writer(&self) -> MutexGuard<'_, W> {
        self.writer.lock().await
    }
}
