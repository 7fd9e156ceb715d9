//! The transport seam between the client and the wire.
//!
//! [`ApiClient`](crate::ApiClient) composes requests and decodes responses;
//! actually moving bytes is behind [`HttpTransport`], so tests can
//! substitute an in-memory implementation for the reqwest one.

use async_trait::async_trait;
use reqwest::header;
use thiserror::Error;
use url::Url;

use crate::request::{Method, RequestBody};

// ============================================================================
// Transport Values
// ============================================================================

/// A fully-composed outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including query string.
    pub url: Url,
    /// Final header set.
    pub headers: Vec<(String, String)>,
    /// Outbound body.
    pub body: RequestBody,
}

/// A delivered response, body already read.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical status text, empty when unknown.
    pub status_text: String,
    /// `Content-Type` header value, when present.
    pub content_type: Option<String>,
    /// Body text.
    pub body: String,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true when the body is declared as JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
    }
}

/// Error type for transport execution.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request failed before or during delivery.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request could not be constructed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connection-level failure from a non-reqwest transport.
    #[error("connection failed: {0}")]
    Connect(String),
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Executes one composed request and reads the response body.
///
/// Implementations do not interpret statuses or bodies; normalization into
/// `ApiError` happens in the client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs the round trip.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// The production transport, backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates the transport.
    pub fn new() -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .user_agent(concat!("cfomatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.inner.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let body = serde_json::to_string(&value)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                builder.body(body)
            }
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Multipart(form) => {
                let mut multipart = reqwest::multipart::Form::new();
                for part in form.parts {
                    let mut piece = reqwest::multipart::Part::bytes(part.data);
                    if let Some(filename) = part.filename {
                        piece = piece.file_name(filename);
                    }
                    if let Some(content_type) = part.content_type {
                        piece = piece
                            .mime_str(&content_type)
                            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                    }
                    multipart = multipart.part(part.name, piece);
                }
                builder.multipart(multipart)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;

        Ok(TransportResponse {
            status,
            status_text,
            content_type,
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> TransportResponse {
        TransportResponse {
            status,
            status_text: String::new(),
            content_type: content_type.map(String::from),
            body: String::new(),
        }
    }

    #[test]
    fn test_is_ok_bounds() {
        assert!(response(200, None).is_ok());
        assert!(response(299, None).is_ok());
        assert!(!response(199, None).is_ok());
        assert!(!response(300, None).is_ok());
        assert!(!response(404, None).is_ok());
    }

    #[test]
    fn test_is_json_accepts_charset_suffix() {
        assert!(response(200, Some("application/json")).is_json());
        assert!(response(200, Some("application/json; charset=utf-8")).is_json());
        assert!(!response(200, Some("text/html")).is_json());
        assert!(!response(200, None).is_json());
    }
}
