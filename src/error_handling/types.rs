//! Error type definitions.
//!
//! This module defines the lookup, resolver-list and initialization errors used
//! throughout the application.

use std::net::SocketAddr;
use std::time::Duration;

use hickory_proto::error::ProtoError;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client used for the resolver list.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// No usable resolver address was configured.
    #[error("Resolver pool is empty")]
    EmptyResolverPool,

    /// A resolver given on the command line could not be parsed.
    #[error("Invalid resolver address '{0}'")]
    InvalidResolver(String),
}

/// Failure to retrieve or parse the remote resolver list.
///
/// Never fatal: the caller keeps the default resolver set.
#[derive(Error, Debug)]
pub enum ResolverListFetchError {
    /// The HTTP request itself failed (connect, TLS, body read).
    #[error("resolver list request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The server answered with a non-success status.
    #[error("resolver list request returned HTTP {0}")]
    Status(u16),

    /// The body held no resolver entries.
    #[error("resolver list is empty")]
    Empty,

    /// An entry is neither an IP literal nor a socket address.
    #[error("resolver list contains malformed entry '{entry}'")]
    Malformed {
        /// The offending entry, trimmed
        entry: String,
    },
}

/// Low-level failure talking to a DNS server.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Socket-level failure (bind, connect, send, receive).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No matching response arrived in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The response could not be decoded.
    #[error("malformed message: {0}")]
    Malformed(#[from] ProtoError),

    /// A TCP response answered a different query.
    #[error("response id {actual} does not match query id {expected}")]
    IdMismatch {
        /// ID sent in the query
        expected: u16,
        /// ID found in the response
        actual: u16,
    },
}

/// Failure of a single CNAME lookup.
///
/// All variants are expected during normal operation and are dropped by the
/// workers; they only feed the [`LookupStats`](super::LookupStats) counters.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The domain cannot be encoded as a DNS name.
    #[error("invalid domain name '{domain}': {source}")]
    InvalidName {
        /// Domain as queried
        domain: String,
        /// Encoder error
        #[source]
        source: ProtoError,
    },

    /// The server could not be reached or answered garbage.
    #[error("transport error querying {server}: {source}")]
    Transport {
        /// Server that was queried
        server: SocketAddr,
        /// Underlying transport failure
        #[source]
        source: TransportError,
    },

    /// The answer section was empty.
    #[error("no answers for {domain}")]
    NoAnswer {
        /// Domain as queried (fully qualified)
        domain: String,
    },

    /// The answer section held records, none of type CNAME.
    #[error("no cname for {domain}")]
    NoCname {
        /// Domain as queried (fully qualified)
        domain: String,
    },
}

impl LookupError {
    /// Returns the counter category for this error.
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::InvalidName { .. } => LookupErrorKind::InvalidName,
            LookupError::Transport { .. } => LookupErrorKind::Transport,
            LookupError::NoAnswer { .. } => LookupErrorKind::NoAnswer,
            LookupError::NoCname { .. } => LookupErrorKind::NoCname,
        }
    }
}

/// Categories of lookup failure, one counter each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LookupErrorKind {
    /// See [`LookupError::InvalidName`]
    InvalidName,
    /// See [`LookupError::Transport`]
    Transport,
    /// See [`LookupError::NoAnswer`]
    NoAnswer,
    /// See [`LookupError::NoCname`]
    NoCname,
}

impl LookupErrorKind {
    /// Human-readable label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupErrorKind::InvalidName => "Invalid domain name",
            LookupErrorKind::Transport => "Transport error",
            LookupErrorKind::NoAnswer => "No answer",
            LookupErrorKind::NoCname => "No CNAME record",
        }
    }
}
