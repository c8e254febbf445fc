//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON, on stderr)
//! - Resolver pool (defaults plus optional remote list)
//! - DNS lookup engine
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

use std::sync::Arc;

use crate::config::Config;
use crate::dns::DnsClient;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{default_resolver_pool, init_resolver_pool};

/// Initializes the DNS client used by every worker.
///
/// The per-query timeout comes from `--timeout-seconds`.
pub fn init_dns_client(config: &Config) -> Arc<DnsClient> {
    Arc::new(DnsClient::new(config.dns_timeout()))
}
