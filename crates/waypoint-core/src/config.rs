//! Client configuration and per-call options

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::body::CONTENT_TYPE_FORM;

/// Configuration bound to a client instance.
///
/// Headers, query parameters and the request content type configured here
/// apply to every call unless overridden per call. The configuration is
/// read-only for the duration of a call; replacing it on the owning
/// client between calls affects subsequent calls only.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every call path is appended to
    pub api_endpoint: String,
    /// Client-level default headers
    pub headers: HashMap<String, String>,
    /// Client-level default query parameters
    pub query: HashMap<String, String>,
    /// Default request body encoding, overridable per call
    pub request_content_type: String,
    /// Optional request timeout, delegated to the transport
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for the given base endpoint.
    ///
    /// The default request content type is form-urlencoded.
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            headers: HashMap::new(),
            query: HashMap::new(),
            request_content_type: CONTENT_TYPE_FORM.to_string(),
            timeout: None,
        }
    }

    /// Add a client-level default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a client-level default query parameter.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Set the default request body content type.
    pub fn with_request_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.request_content_type = content_type.into();
        self
    }

    /// Set the transport-level request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Per-call overrides, created fresh for each call.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Headers overlaid on the client-level defaults, call wins on conflict
    pub headers: Option<HashMap<String, String>>,
    /// Query parameters overlaid on the client-level defaults
    pub query: Option<HashMap<String, String>>,
    /// Request payload; ignored for GET calls
    pub body: Option<Value>,
    /// Body encoding override for this call
    pub content_type: Option<String>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a call-level header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add a call-level query parameter.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the request payload.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the body encoding for this call.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
