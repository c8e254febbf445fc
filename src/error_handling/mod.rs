//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions (lookup, resolver list, initialization)
//! - Lookup statistics tracking (successes and failures per kind)
//!
//! Lookup failures are expected and numerous. They are never logged; the
//! counters in [`LookupStats`] are the structured channel through which they
//! can be observed.

mod stats;
mod types;

// Re-export public API
pub use stats::LookupStats;
pub use types::{
    InitializationError, LookupError, LookupErrorKind, ResolverListFetchError, TransportError,
};
