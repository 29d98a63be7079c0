//! Waypoint Core - base layer for building typed HTTP API clients
//!
//! This crate centralizes the plumbing every typed client against a
//! JSON/text/binary HTTP API repeats:
//!
//! - **URL composition**: join a configured base endpoint with call paths
//! - **Layered parameters**: client-level header/query defaults overridden
//!   by per-call values
//! - **Body encoding**: form-urlencoded or JSON, selected by content type
//! - **Response decoding**: JSON, text, or raw bytes, sniffed from the
//!   response's declared content type
//! - **Error taxonomy**: transport and HTTP failures mapped to a closed,
//!   status-code-aware set of error kinds
//!
//! Each call is a single synchronous attempt from the caller's point of
//! view: no retries, no caching, no authentication flows. Connection
//! pooling, TLS, and redirects are delegated to the underlying transport.
//!
//! # Example
//!
//! ```no_run
//! use waypoint_core::{CallOptions, Client, ClientConfig, Result};
//! use serde_json::json;
//!
//! async fn example() -> Result<()> {
//!     let config = ClientConfig::new("https://api.example.com/v2")
//!         .with_header("X-Api-Key", "secret");
//!     let client = Client::new("ExampleClient", config)?;
//!
//!     let response = client.get("/widgets", None).await?;
//!     println!("status: {}", response.status_code);
//!
//!     let options = CallOptions::new()
//!         .body(json!({"name": "sprocket"}))
//!         .content_type("application/json");
//!     client.post("/widgets", Some(options)).await?;
//!     Ok(())
//! }
//! ```

pub mod body;
pub mod client;
pub mod compose;
pub mod config;
pub mod decode;
pub mod error;
pub mod params;

// Re-export main types for convenience
pub use body::{encode, EncodedBody, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};
pub use client::{Client, Response};
pub use compose::compose;
pub use config::{CallOptions, ClientConfig};
pub use decode::{decode, Data};
pub use error::{Error, ErrorKind, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
