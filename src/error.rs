//! Error types for the cache client

use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;

/// Result type for cache client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category for programmatic branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Unknown,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    /// The entry already exists (HTTP 409)
    Exists,
    Timeout,
    Internal,
    ServiceUnavailable,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Unknown => "unknown",
            Kind::BadRequest => "bad request",
            Kind::Unauthorized => "unauthorized",
            Kind::Forbidden => "forbidden",
            Kind::NotFound => "not found",
            Kind::Exists => "already exists",
            Kind::Timeout => "timeout",
            Kind::Internal => "internal",
            Kind::ServiceUnavailable => "service unavailable",
        };
        f.write_str(name)
    }
}

/// Error type for cache client operations
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure (connection, DNS, timeout), passed through as-is
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base address does not form a valid cache URL
    #[error("invalid cache url {url:?}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// Underlying parse failure
        #[source]
        source: url::ParseError,
    },

    /// No entry exists for the requested key
    #[error("not found")]
    NotFound,

    /// The service answered with an unexpected status
    #[error("{kind}: {message}")]
    Status {
        /// Kind derived from the status code
        kind: Kind,
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// The error kind, or `None` for transport failures which are not classified
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Error::Http(_) => None,
            Error::InvalidUrl { .. } | Error::Config(_) => Some(Kind::Internal),
            Error::NotFound => Some(Kind::NotFound),
            Error::Status { kind, .. } => Some(*kind),
        }
    }

    /// Whether the requested entry does not exist
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(Kind::NotFound)
    }
}
