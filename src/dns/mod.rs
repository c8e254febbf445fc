//! DNS query engine.
//!
//! This module provides single-shot CNAME lookups built on `hickory-proto`:
//! - Query construction (fully-qualified name, CNAME type, recursion desired)
//! - UDP exchange with TCP fallback on truncated answers
//! - Extraction of the first CNAME target from the answer section
//!
//! Each call talks to exactly one server and never retries.

mod client;
mod query;
mod response;
mod transport;

// Re-export public API
pub use client::{CnameLookup, DnsClient};
pub use query::{build_cname_query, to_fqdn};
pub use response::extract_cname;
