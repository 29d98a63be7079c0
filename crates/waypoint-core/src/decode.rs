//! Response body decoding by observed content type
//!
//! The decoding strategy is sniffed from the response's declared
//! `Content-Type` header, never from a caller-specified expectation. The
//! same rule is applied to success responses and to HTTP-error responses.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded response body.
///
/// Exactly one variant is produced per response, chosen solely from the
/// declared content type at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Data {
    /// Body declared `application/json`, parsed
    Json(Value),
    /// Body declared `text/plain`, decoded as UTF-8
    Text(String),
    /// Any other declaration, raw payload unmodified
    Bytes(Vec<u8>),
}

impl Data {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Data::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Data::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Data::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

fn json_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^application/json(\s*;.+)?$").expect("valid regex"))
}

fn text_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^text/plain(\s*;.+)?$").expect("valid regex"))
}

/// Decode a raw response body according to its declared content type.
///
/// An optional parameter suffix (`; charset=...`) on the declaration is
/// ignored for matching. A missing declaration behaves as an empty string
/// and yields raw bytes. JSON parse failures are not caught here; the
/// caller reports them as a generic decode failure.
pub fn decode(bytes: &[u8], content_type: &str) -> Result<Data, serde_json::Error> {
    if json_pattern().is_match(content_type) {
        Ok(Data::Json(serde_json::from_slice(bytes)?))
    } else if text_pattern().is_match(content_type) {
        Ok(Data::Text(String::from_utf8_lossy(bytes).into_owned()))
    } else {
        Ok(Data::Bytes(bytes.to_vec()))
    }
}
