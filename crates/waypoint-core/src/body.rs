//! Request body encoding by declared content type

use serde_json::Value;

use crate::error::{Error, Result};

/// Content type for form-encoded request bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Content type for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A wire-ready request body together with the content type it was
/// encoded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode an optional payload under the resolved content type.
///
/// No payload encodes to no body regardless of content type. A payload
/// under any content type other than form-urlencoded or JSON is a
/// configuration error, reported before any network call is attempted.
pub fn encode(body: Option<&Value>, content_type: &str) -> Result<Option<EncodedBody>> {
    let Some(body) = body else {
        return Ok(None);
    };

    match content_type {
        CONTENT_TYPE_FORM => Ok(Some(EncodedBody {
            content_type: CONTENT_TYPE_FORM,
            bytes: encode_form(body)?,
        })),
        CONTENT_TYPE_JSON => Ok(Some(EncodedBody {
            content_type: CONTENT_TYPE_JSON,
            bytes: serde_json::to_vec(body).map_err(|e| Error::Configuration {
                message: format!("failed to serialize JSON request body: {}", e),
                content_type: Some(CONTENT_TYPE_JSON.to_string()),
            })?,
        })),
        other => Err(Error::unknown_content_type(other)),
    }
}

/// Form-encode a key/value object payload.
///
/// String values are taken as-is; other scalar values use their JSON
/// rendering. Anything but an object at the top level cannot be expressed
/// as form pairs and is rejected.
fn encode_form(body: &Value) -> Result<Vec<u8>> {
    let Some(map) = body.as_object() else {
        return Err(Error::Configuration {
            message: "form encoding requires a key/value object body".to_string(),
            content_type: Some(CONTENT_TYPE_FORM.to_string()),
        });
    };

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in map {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        serializer.append_pair(key, &value);
    }
    Ok(serializer.finish().into_bytes())
}
