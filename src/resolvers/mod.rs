//! Resolver pool management.
//!
//! This module provides:
//! - The immutable [`ResolverPool`] and its uniform random `pick`
//! - Parsing of resolver entries and comma-separated lists
//! - The [`ResolverSource`] seam and its HTTP implementation

mod pool;
mod source;

// Re-export public API
pub use pool::{parse_server, parse_server_list, ResolverPool};
pub use source::{RemoteResolverList, ResolverSource};
