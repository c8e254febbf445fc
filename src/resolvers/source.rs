//! Sources of resolver lists.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;

use crate::error_handling::{InitializationError, ResolverListFetchError};

use super::pool::parse_server_list;

/// Provides the current resolver set.
///
/// The production implementation downloads a comma-separated list over HTTP;
/// tests plug in fixed or failing lists.
#[async_trait]
pub trait ResolverSource: Send + Sync {
    /// Retrieves and parses the resolver list.
    async fn fetch(&self) -> Result<Vec<SocketAddr>, ResolverListFetchError>;

    /// Short description used in log messages.
    fn describe(&self) -> String;
}

/// Resolver list downloaded from a remote document.
pub struct RemoteResolverList {
    client: reqwest::Client,
    url: String,
}

impl RemoteResolverList {
    /// Creates a source for `url` with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, InitializationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("domain_cname/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ResolverSource for RemoteResolverList {
    async fn fetch(&self) -> Result<Vec<SocketAddr>, ResolverListFetchError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ResolverListFetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_server_list(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
