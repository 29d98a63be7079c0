//! Request executor orchestrating URL composition, parameter merging,
//! body encoding, and response decoding
//!
//! Every call is a single attempt: compose URL, merge headers/query,
//! encode the body, issue the request, then decode on success or classify
//! on failure. Retry policy, if any, belongs to the caller.

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::debug;

use crate::body;
use crate::compose::compose;
use crate::config::{CallOptions, ClientConfig};
use crate::decode::{decode, Data};
use crate::error::{Error, ErrorKind, Result};
use crate::params;

/// A decoded API response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The decoded body: JSON value, text, or raw bytes
    pub data: Data,
    /// The HTTP status code of the response
    pub status_code: u16,
}

/// Base HTTP client for typed API clients.
///
/// Holds an immutable [`ClientConfig`] and a pooled transport. The client
/// is cheap to clone and safe to share across tasks; concurrent calls are
/// independent and share no mutable state.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    service_name: String,
}

impl Client {
    /// Bind a configuration to a named client.
    ///
    /// `service_name` identifies the calling client type and is carried by
    /// every error the client produces.
    pub fn new(service_name: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| Error::Configuration {
            message: format!("failed to build HTTP transport: {}", e),
            content_type: None,
        })?;

        Ok(Self {
            http,
            config,
            service_name: service_name.into(),
        })
    }

    /// Get the bound configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replace the bound configuration.
    ///
    /// The new values apply to subsequent calls only.
    pub fn set_config(&mut self, config: ClientConfig) {
        self.config = config;
    }

    /// Issue a GET request. Options may carry headers and query
    /// parameters; a body, if present, is ignored.
    pub async fn get(&self, path: &str, options: Option<CallOptions>) -> Result<Response> {
        self.request(Method::GET, path, options.unwrap_or_default())
            .await
    }

    /// Issue a POST request. Options may additionally carry a body and a
    /// content-type override.
    pub async fn post(&self, path: &str, options: Option<CallOptions>) -> Result<Response> {
        self.request(Method::POST, path, options.unwrap_or_default())
            .await
    }

    async fn request(&self, method: Method, path: &str, options: CallOptions) -> Result<Response> {
        let url = compose(&self.config.api_endpoint, path);
        let headers = params::merge(&self.config.headers, options.headers.as_ref());
        let query = params::merge(&self.config.query, options.query.as_ref());

        // Encoding failures abort before any network call. GET never
        // encodes a body.
        let encoded = if method == Method::GET {
            None
        } else {
            let content_type = options
                .content_type
                .as_deref()
                .unwrap_or(&self.config.request_content_type);
            body::encode(options.body.as_ref(), content_type)?
        };

        debug!(service = %self.service_name, %method, %url, "issuing request");

        let mut request = self.http.request(method, &url);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(encoded) = encoded {
            // Merged headers win over the encoder's content type.
            if !headers.keys().any(|k| k.eq_ignore_ascii_case("content-type")) {
                request = request.header(CONTENT_TYPE, encoded.content_type);
            }
            request = request.body(encoded.bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        let status = response.status();
        let status_code = status.as_u16();
        let status_error = response.error_for_status_ref().err();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        // The identical decoding rule applies to success and error bodies.
        let data = decode(&bytes, &content_type).map_err(|e| Error::Api {
            service_name: self.service_name.clone(),
            source_path: path.to_string(),
            original_error: anyhow::Error::new(e),
        })?;

        if !status.is_success() {
            let kind = ErrorKind::classify(status_code);
            debug!(
                service = %self.service_name,
                status = status_code,
                %kind,
                "request failed"
            );
            return Err(Error::Http {
                kind,
                service_name: self.service_name.clone(),
                source_path: path.to_string(),
                internal_status_code: status_code,
                response: data,
                original_error: status_error.map(anyhow::Error::new),
            });
        }

        debug!(service = %self.service_name, status = status_code, "request succeeded");
        Ok(Response { data, status_code })
    }

    fn transport_error(&self, path: &str, error: reqwest::Error) -> Error {
        Error::Api {
            service_name: self.service_name.clone(),
            source_path: path.to_string(),
            original_error: anyhow::Error::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Client {
        Client::new("TestClient", ClientConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_get_decodes_json_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foo": "bar"})))
            .mount(&server)
            .await;

        let response = client_for(&server).get("/widgets", None).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.data, Data::Json(json!({"foo": "bar"})));
    }

    #[tokio::test]
    async fn test_get_decodes_text_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/motd"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("hello world", "text/plain; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let response = client_for(&server).get("/motd", None).await.unwrap();
        assert_eq!(response.data, Data::Text("hello world".to_string()));
    }

    #[tokio::test]
    async fn test_get_passes_through_binary_response() {
        let server = MockServer::start().await;
        let payload = vec![0u8, 159, 146, 150];
        Mock::given(method("GET"))
            .and(path("/blob"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(payload.clone(), "application/octet-stream"),
            )
            .mount(&server)
            .await;

        let response = client_for(&server).get("/blob", None).await.unwrap();
        assert_eq!(response.data, Data::Bytes(payload));
    }

    #[tokio::test]
    async fn test_get_404_raises_not_found_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "nope"})))
            .mount(&server)
            .await;

        let result = client_for(&server).get("/missing", None).await;
        match result {
            Err(Error::Http {
                kind,
                internal_status_code,
                response,
                source_path,
                ..
            }) => {
                assert_eq!(kind, ErrorKind::NotFound);
                assert_eq!(internal_status_code, 404);
                assert_eq!(response, Data::Json(json!({"error": "nope"})));
                assert_eq!(source_path, "/missing");
            }
            other => panic!("expected Http error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unmapped_4xx_classifies_as_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teapot"))
            .respond_with(ResponseTemplate::new(418).set_body_raw("short and stout", "text/plain"))
            .mount(&server)
            .await;

        let result = client_for(&server).get("/teapot", None).await;
        match result {
            Err(Error::Http { kind, response, .. }) => {
                assert_eq!(kind, ErrorKind::HttpClient);
                assert_eq!(response, Data::Text("short and stout".to_string()));
            }
            other => panic!("expected Http error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_body_with_unrecognized_content_type_degrades_to_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_raw("oops", "application/unknown"))
            .mount(&server)
            .await;

        let result = client_for(&server).get("/broken", None).await;
        match result {
            Err(Error::Http { kind, response, .. }) => {
                assert_eq!(kind, ErrorKind::InternalServer);
                assert_eq!(response, Data::Bytes(b"oops".to_vec()));
            }
            other => panic!("expected Http error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_json_body_observed_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/things"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"foo":"bar"}"#))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let options = CallOptions::new()
            .body(json!({"foo": "bar"}))
            .content_type("application/json");
        let response = client_for(&server)
            .post("/things", Some(options))
            .await
            .unwrap();
        assert_eq!(response.status_code, 201);
        assert_eq!(response.data, Data::Json(json!({"id": 1})));
    }

    #[tokio::test]
    async fn test_post_default_content_type_is_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/things"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string("foo=bar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let options = CallOptions::new().body(json!({"foo": "bar"}));
        let response = client_for(&server)
            .post("/things", Some(options))
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_post_unknown_content_type_fails_without_network_call() {
        let server = MockServer::start().await;

        let options = CallOptions::new()
            .body(json!({"foo": "bar"}))
            .content_type("application/bad-content-type");
        let result = client_for(&server).post("/things", Some(options)).await;

        match result {
            Err(Error::Configuration { content_type, .. }) => {
                assert_eq!(
                    content_type.as_deref(),
                    Some("application/bad-content-type")
                );
            }
            other => panic!("expected Configuration error, got: {:?}", other),
        }
        let received = server.received_requests().await.unwrap();
        assert!(received.is_empty(), "no request should reach the wire");
    }

    #[tokio::test]
    async fn test_call_level_headers_and_query_win_on_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(header("X-Api-Key", "call"))
            .and(header("Accept", "application/json"))
            .and(query_param("token", "abc"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let config = ClientConfig::new(server.uri())
            .with_header("X-Api-Key", "client")
            .with_header("Accept", "application/json")
            .with_query_param("token", "abc");
        let client = Client::new("TestClient", config).unwrap();

        let options = CallOptions::new()
            .header("X-Api-Key", "call")
            .query_param("page", "2");
        let response = client.get("/search", Some(options)).await.unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_base_path_prefix_is_preserved_on_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/widgets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let config = ClientConfig::new(format!("{}/api/v2", server.uri()));
        let client = Client::new("TestClient", config).unwrap();
        let response = client.get("/widgets", None).await.unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_get_ignores_body_in_options() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        // A body with an unknown content type would fail encoding; GET
        // must not attempt it.
        let options = CallOptions::new()
            .body(json!({"foo": "bar"}))
            .content_type("application/bad-content-type");
        let response = client_for(&server)
            .get("/widgets", Some(options))
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_invalid_json_success_body_is_a_generic_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
            .mount(&server)
            .await;

        let result = client_for(&server).get("/garbled", None).await;
        assert!(matches!(result, Err(Error::Api { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_wraps_original_path() {
        // Nothing listens on port 1; the connect fails before any response.
        let config = ClientConfig::new("http://127.0.0.1:1");
        let client = Client::new("TestClient", config).unwrap();

        let result = client.get("/unreachable", None).await;
        match result {
            Err(Error::Api {
                service_name,
                source_path,
                ..
            }) => {
                assert_eq!(service_name, "TestClient");
                assert_eq!(source_path, "/unreachable");
            }
            other => panic!("expected Api error, got: {:?}", other),
        }
    }
}
