//! Error taxonomy and HTTP status classification
//!
//! Every failure a call can produce is one variant of [`Error`], using
//! thiserror for ergonomic error definitions and anyhow for opaque
//! underlying-failure slots. HTTP failures are tagged with an
//! [`ErrorKind`] resolved by a two-tier status lookup: exact codes first,
//! then the 4xx/5xx ranges, then a generic fallback.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Data;

/// Tag for HTTP-level failures.
///
/// The set is closed: callers match on the tag or use the range predicates
/// rather than relying on any type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServer,
    /// Any other status in [400, 500)
    HttpClient,
    /// Any other status in [500, 600)
    HttpServer,
    /// A failure status outside the known ranges
    Http,
}

impl ErrorKind {
    /// Map a status code to its error kind.
    ///
    /// Exact codes take precedence over the range that contains them:
    /// 404 classifies as `NotFound`, never as the generic `HttpClient`.
    /// Statuses outside [400, 600) fall through to the generic `Http` kind.
    pub fn classify(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            404 => ErrorKind::NotFound,
            500 => ErrorKind::InternalServer,
            400..=499 => ErrorKind::HttpClient,
            500..=599 => ErrorKind::HttpServer,
            _ => ErrorKind::Http,
        }
    }

    /// True for kinds in the 4xx class, exact refinements included.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::BadRequest | ErrorKind::NotFound | ErrorKind::HttpClient
        )
    }

    /// True for kinds in the 5xx class, exact refinements included.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ErrorKind::InternalServer | ErrorKind::HttpServer)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::BadRequest => write!(f, "bad request"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::InternalServer => write!(f, "internal server error"),
            ErrorKind::HttpClient => write!(f, "HTTP client error"),
            ErrorKind::HttpServer => write!(f, "HTTP server error"),
            ErrorKind::Http => write!(f, "HTTP error"),
        }
    }
}

/// Main error type for waypoint calls
#[derive(Error, Debug)]
pub enum Error {
    /// Caller/programmer error detected before any network call is made
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        /// The offending request content type, when that is what went wrong
        content_type: Option<String>,
    },

    /// Transport-level failure with no usable HTTP status
    /// (DNS, connect, timeout, TLS, body read, decode)
    #[error("{service_name}: request to {source_path} failed: {original_error}")]
    Api {
        /// Identifies the calling client type
        service_name: String,
        /// The requested path as given by the caller, not the composed URL
        source_path: String,
        #[source]
        original_error: anyhow::Error,
    },

    /// A response was received but its status signalled failure
    #[error("{service_name}: {kind} ({internal_status_code}) from {source_path}")]
    Http {
        kind: ErrorKind,
        /// Identifies the calling client type
        service_name: String,
        /// The requested path as given by the caller, not the composed URL
        source_path: String,
        /// The original numeric status code, verbatim
        internal_status_code: u16,
        /// The error response body, decoded with the same rule as success
        /// bodies
        response: Data,
        #[source]
        original_error: Option<anyhow::Error>,
    },
}

impl Error {
    /// Build the configuration error for an unrecognized request content
    /// type.
    pub(crate) fn unknown_content_type(content_type: &str) -> Self {
        Error::Configuration {
            message: format!("unknown content type for request: {}", content_type),
            content_type: Some(content_type.to_string()),
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
