//! Resolver pool and random server selection.

use std::net::{IpAddr, SocketAddr};

use log::{debug, info};
use rand::Rng;

use crate::config::{DEFAULT_RESOLVERS, DNS_PORT};
use crate::error_handling::{InitializationError, ResolverListFetchError};

use super::source::ResolverSource;

/// Parses one resolver entry.
///
/// Accepts a bare IPv4/IPv6 literal (port 53 implied) or a full socket address
/// such as `127.0.0.1:5353` or `[::1]:53`. Surrounding whitespace is ignored.
pub fn parse_server(entry: &str) -> Option<SocketAddr> {
    let entry = entry.trim();
    if let Ok(addr) = entry.parse::<SocketAddr>() {
        return Some(addr);
    }
    entry
        .parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}

/// Parses a comma-separated resolver list.
///
/// Empty entries (a trailing comma or newline) are skipped. A single malformed
/// entry rejects the whole list, as does a list with no entries at all.
pub fn parse_server_list(body: &str) -> Result<Vec<SocketAddr>, ResolverListFetchError> {
    let mut servers = Vec::new();
    for entry in body.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match parse_server(entry) {
            Some(addr) => servers.push(addr),
            None => {
                return Err(ResolverListFetchError::Malformed {
                    entry: entry.to_string(),
                })
            }
        }
    }
    if servers.is_empty() {
        return Err(ResolverListFetchError::Empty);
    }
    Ok(servers)
}

/// The set of DNS servers available for queries.
///
/// Immutable once built and never empty. Selection takes the random source as
/// an argument, so sharing the pool between tasks needs no locking and tests
/// can seed the choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPool {
    servers: Vec<SocketAddr>,
}

impl ResolverPool {
    /// Builds a pool from already-parsed addresses.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::EmptyResolverPool` if `servers` is empty.
    pub fn new(servers: Vec<SocketAddr>) -> Result<Self, InitializationError> {
        if servers.is_empty() {
            return Err(InitializationError::EmptyResolverPool);
        }
        Ok(Self { servers })
    }

    /// Builds a pool from textual entries (IP literals or socket addresses).
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidResolver` for the first entry that
    /// cannot be parsed, or `EmptyResolverPool` if no entries remain.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, InitializationError> {
        let mut servers = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = entry.as_ref();
            if entry.trim().is_empty() {
                continue;
            }
            let addr = parse_server(entry)
                .ok_or_else(|| InitializationError::InvalidResolver(entry.to_string()))?;
            servers.push(addr);
        }
        Self::new(servers)
    }

    /// The built-in public resolver set.
    pub fn builtin() -> Self {
        let servers = DEFAULT_RESOLVERS
            .iter()
            .filter_map(|entry| parse_server(entry))
            .collect();
        Self { servers }
    }

    /// Builds the pool for a run.
    ///
    /// When a source is given, its list replaces `defaults` entirely. Any
    /// fetch failure (network error, bad status, empty or malformed body)
    /// keeps `defaults` unchanged.
    pub async fn initialize(defaults: ResolverPool, source: Option<&dyn ResolverSource>) -> Self {
        let Some(source) = source else {
            return defaults;
        };

        match source.fetch().await {
            Ok(servers) if !servers.is_empty() => {
                info!(
                    "Using {} resolvers from {}",
                    servers.len(),
                    source.describe()
                );
                Self { servers }
            }
            Ok(_) => {
                debug!(
                    "Resolver list from {} is empty, keeping {} default resolvers",
                    source.describe(),
                    defaults.len()
                );
                defaults
            }
            Err(e) => {
                debug!(
                    "Failed to fetch resolver list from {}: {e}. Keeping {} default resolvers",
                    source.describe(),
                    defaults.len()
                );
                defaults
            }
        }
    }

    /// Picks one server uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> SocketAddr {
        self.servers[rng.random_range(0..self.servers.len())]
    }

    /// Number of servers, duplicates included.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Returns true if the pool holds no servers.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Servers in pool order.
    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }
}
