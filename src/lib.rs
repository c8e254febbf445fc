//! domain_cname library: concurrent CNAME resolution
//!
//! This library resolves the CNAME record of every domain read from an input
//! stream, spreading single-shot queries over a pool of public DNS resolvers
//! and a fixed pool of workers, and writes the canonical names to stdout.
//!
//! # Example
//!
//! ```no_run
//! use domain_cname::{Config, run_resolve};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     verbose: true,
//!     offline: true,
//!     ..Default::default()
//! };
//!
//! let report = run_resolve(config).await?;
//! eprintln!("Resolved {} of {} domains", report.resolved, report.dispatched);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod pipeline;
pub mod resolvers;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{CnameLookup, DnsClient};
pub use error_handling::{LookupError, LookupErrorKind, LookupStats};
pub use pipeline::{run_pipeline, CnameResult, OutputSink};
pub use resolvers::{ResolverPool, ResolverSource};
pub use app::{lookup_statistics_lines, print_lookup_statistics};
pub use run::{run_resolve, ResolveReport};

// Internal run module (wires configuration, stdio and the pipeline together)
mod run {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::info;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;
    use tokio::io::{AsyncBufRead, BufReader, BufWriter};
    use tokio_util::sync::CancellationToken;

    use crate::app::{shutdown_gracefully, spawn_progress_logger};
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::error_handling::{LookupErrorKind, LookupStats};
    use crate::initialization::{init_dns_client, init_resolver_pool};
    use crate::pipeline::{run_pipeline, OutputSink};

    /// Results of a resolution run.
    #[derive(Debug, Clone)]
    pub struct ResolveReport {
        /// Domains handed to the workers
        pub dispatched: usize,
        /// Domains that produced an output line
        pub resolved: usize,
        /// Domains whose lookup failed (no output)
        pub failed: usize,
        /// Non-zero failure counts per kind
        pub failure_counts: Vec<(LookupErrorKind, usize)>,
        /// Size of the worker pool
        pub workers: usize,
        /// Size of the resolver pool
        pub resolvers: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a resolution pass with the provided configuration.
    ///
    /// Reads domains from `config.file` (`-` for stdin) and writes resolved
    /// names to stdout. Per-domain failures never abort the run.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be opened
    /// - A `--resolvers` entry is not a valid address
    pub async fn run_resolve(config: Config) -> Result<ResolveReport> {
        let input: Box<dyn AsyncBufRead + Unpin + Send> = if config.reads_stdin() {
            info!("Reading domains from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        } else {
            let file = tokio::fs::File::open(&config.file)
                .await
                .with_context(|| format!("Failed to open input file {}", config.file.display()))?;
            Box::new(BufReader::new(file))
        };

        let pool = init_resolver_pool(&config)
            .await
            .context("Failed to initialize resolver pool")?;
        let engine = init_dns_client(&config);
        let workers = config.worker_count(pool.len());
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let sink = Arc::new(OutputSink::new(
            BufWriter::new(tokio::io::stdout()),
            config.verbose,
        ));
        let stats = Arc::new(LookupStats::new());

        let start_time = Instant::now();
        let cancel = CancellationToken::new();
        let logging_task = Some(spawn_progress_logger(
            start_time,
            Arc::clone(&stats),
            Duration::from_secs(LOGGING_INTERVAL),
            cancel.child_token(),
        ));

        let dispatched = run_pipeline(
            input,
            &pool,
            &mut rng,
            engine,
            sink,
            Arc::clone(&stats),
            workers,
        )
        .await;

        shutdown_gracefully(cancel, logging_task).await;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        let failure_counts = LookupErrorKind::iter()
            .map(|kind| (kind, stats.failure_count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect();

        Ok(ResolveReport {
            dispatched,
            resolved: stats.resolved(),
            failed: stats.total_failures(),
            failure_counts,
            workers,
            resolvers: pool.len(),
            elapsed_seconds,
        })
    }
}
