//! Configuration constants.
//!
//! This module defines the operational defaults: the built-in resolver set,
//! the remote resolver list location, worker sizing and network timeouts.

/// Built-in resolver set used when no remote list is available.
///
/// Duplicates are intentional: Google's resolvers appear twice so they are
/// picked roughly twice as often as the others.
pub const DEFAULT_RESOLVERS: &[&str] = &[
    "8.8.8.8", "8.8.4.4", "9.9.9.9", "1.1.1.1", "1.0.0.1", "8.8.8.8", "8.8.4.4",
];

/// Comma-separated list of fresh public resolvers, fetched at startup.
pub const RESOLVER_LIST_URL: &str =
    "https://raw.githubusercontent.com/BBerastegui/fresh-dns-servers/master/resolvers.csv";

/// Port used when a resolver entry is a bare IP literal.
pub const DNS_PORT: u16 = 53;

/// Workers launched per resolver when no explicit `--workers` count is given.
pub const WORKERS_PER_RESOLVER: usize = 10;

// Network operation timeouts
/// Per-query DNS timeout in seconds (covers the UDP round-trip and any TCP fallback)
pub const DNS_TIMEOUT_SECS: u64 = 2;
/// Timeout for downloading the remote resolver list
pub const RESOLVER_FETCH_TIMEOUT_SECS: u64 = 10;

/// Seconds between progress log lines
pub const LOGGING_INTERVAL: u64 = 5;

/// Receive buffer size for UDP responses.
/// Larger than the classic 512-byte limit so EDNS-sized answers from public
/// resolvers are not cut short.
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;
