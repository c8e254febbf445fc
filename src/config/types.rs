//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DNS_TIMEOUT_SECS, RESOLVER_LIST_URL, WORKERS_PER_RESOLVER};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

fn parse_worker_count(s: &str) -> Result<usize, String> {
    let count: usize = s
        .parse()
        .map_err(|e| format!("invalid worker count '{s}': {e}"))?;
    if count == 0 {
        return Err("worker count must be at least 1".to_string());
    }
    Ok(count)
}

/// Runtime configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// by library users starting from `Config::default()`.
///
/// # Examples
///
/// ```no_run
/// use domain_cname::Config;
///
/// let config = Config {
///     verbose: true,
///     workers: Some(50),
///     offline: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_cname",
    version,
    about = "Resolves CNAME records for domains read from stdin using a pool of public DNS resolvers"
)]
pub struct Config {
    /// File to read domains from (`-` reads stdin)
    #[arg(default_value = "-")]
    pub file: PathBuf,

    /// Output the source domain too, as `cname,domain`
    #[arg(short, long)]
    pub verbose: bool,

    /// Fixed number of concurrent workers (default: 10 per resolver)
    #[arg(long, value_parser = parse_worker_count)]
    pub workers: Option<usize>,

    /// Comma-separated resolvers replacing the built-in default set
    #[arg(long, value_delimiter = ',')]
    pub resolvers: Vec<String>,

    /// Location of the remote comma-separated resolver list
    #[arg(long, default_value = RESOLVER_LIST_URL)]
    pub resolver_list_url: String,

    /// Skip fetching the remote resolver list
    #[arg(long)]
    pub offline: bool,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Seed for resolver selection (random when unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print lookup statistics to stderr at the end of the run
    #[arg(long)]
    pub show_stats: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Returns true when domains should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }

    /// Number of workers for a pool holding `resolver_count` servers.
    ///
    /// An explicit `workers` value wins; otherwise the count scales with the
    /// pool. Never returns zero.
    pub fn worker_count(&self, resolver_count: usize) -> usize {
        self.workers
            .unwrap_or_else(|| resolver_count.saturating_mul(WORKERS_PER_RESOLVER))
            .max(1)
    }

    /// Per-query network timeout.
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("-"),
            verbose: false,
            workers: None,
            resolvers: Vec::new(),
            resolver_list_url: RESOLVER_LIST_URL.to_string(),
            offline: false,
            timeout_seconds: DNS_TIMEOUT_SECS,
            seed: None,
            show_stats: false,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}
