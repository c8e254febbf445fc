//! Resolver pool initialization.
//!
//! An explicit `--resolvers` list is used as given. Otherwise the built-in set
//! is the default, optionally replaced by the remote list.

use std::time::Duration;

use log::{debug, info};

use crate::config::{Config, RESOLVER_FETCH_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use crate::resolvers::{RemoteResolverList, ResolverPool, ResolverSource};

/// Builds the default pool: `--resolvers` when given, else the built-in set.
///
/// # Errors
///
/// Returns `InitializationError::InvalidResolver` if a `--resolvers` entry does
/// not parse.
pub fn default_resolver_pool(config: &Config) -> Result<ResolverPool, InitializationError> {
    if config.resolvers.is_empty() {
        Ok(ResolverPool::builtin())
    } else {
        ResolverPool::from_entries(&config.resolvers)
    }
}

/// Initializes the resolver pool for a run.
///
/// `--resolvers` pins the pool and no remote list is fetched. With the
/// built-in set, the remote list at `resolver_list_url` replaces it unless
/// `offline` is set. Fetch failures of any kind keep the built-in set, and so
/// does failing to build the HTTP client.
///
/// # Errors
///
/// Only configuration errors in `--resolvers` are returned.
pub async fn init_resolver_pool(config: &Config) -> Result<ResolverPool, InitializationError> {
    let defaults = default_resolver_pool(config)?;

    if !config.resolvers.is_empty() {
        info!("Using {} resolvers from --resolvers", defaults.len());
        return Ok(defaults);
    }

    if config.offline {
        info!("Offline mode: using {} default resolvers", defaults.len());
        return Ok(defaults);
    }

    let source = match RemoteResolverList::new(
        config.resolver_list_url.as_str(),
        Duration::from_secs(RESOLVER_FETCH_TIMEOUT_SECS),
    ) {
        Ok(source) => source,
        Err(e) => {
            debug!(
                "Cannot fetch resolver list ({e}), using {} default resolvers",
                defaults.len()
            );
            return Ok(defaults);
        }
    };

    Ok(ResolverPool::initialize(defaults, Some(&source as &dyn ResolverSource)).await)
}
