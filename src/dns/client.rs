//! The CNAME lookup engine.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::op::Message;

use crate::error_handling::{LookupError, TransportError};

use super::query::{build_cname_query, to_fqdn};
use super::response::extract_cname;
use super::transport::{exchange_tcp, exchange_udp};

/// Performs one CNAME lookup against one server.
///
/// The worker pool is generic over this trait so tests can substitute a
/// deterministic engine.
#[async_trait]
pub trait CnameLookup: Send + Sync {
    /// Resolves the CNAME target of `domain` using `server`.
    ///
    /// On success the target is returned dot-terminated, exactly as encoded in
    /// the answer. There is no retry and no fallback to another server.
    async fn resolve_cname(&self, domain: &str, server: SocketAddr) -> Result<String, LookupError>;
}

/// DNS client issuing single CNAME queries over UDP.
///
/// A truncated UDP answer is re-requested over TCP from the same server, within
/// the same timeout budget.
#[derive(Debug, Clone)]
pub struct DnsClient {
    timeout: Duration,
}

impl DnsClient {
    /// Creates a client whose queries give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Sends a recursive CNAME query for `fqdn` and returns the raw response.
    ///
    /// # Errors
    ///
    /// `LookupError::InvalidName` if the name cannot be encoded, otherwise
    /// `LookupError::Transport` for any network, timeout or decode failure.
    pub async fn query(&self, fqdn: &str, server: SocketAddr) -> Result<Message, LookupError> {
        let id: u16 = rand::random();
        let query = build_cname_query(fqdn, id)?;

        let exchange = async {
            let response = exchange_udp(server, &query, id).await?;
            if response.truncated() {
                return exchange_tcp(server, &query, id).await;
            }
            Ok::<_, TransportError>(response)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(source)) => Err(LookupError::Transport { server, source }),
            Err(_) => Err(LookupError::Transport {
                server,
                source: TransportError::Timeout(self.timeout),
            }),
        }
    }
}

impl Default for DnsClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DNS_TIMEOUT_SECS))
    }
}

#[async_trait]
impl CnameLookup for DnsClient {
    async fn resolve_cname(&self, domain: &str, server: SocketAddr) -> Result<String, LookupError> {
        let fqdn = to_fqdn(domain);
        let response = self.query(&fqdn, server).await?;
        extract_cname(&response, &fqdn)
    }
}
