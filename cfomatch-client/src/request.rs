//! Per-call request values.

use std::time::Duration;

use cfomatch_core::ApiError;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Method
// ============================================================================

/// HTTP methods the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

impl Method {
    /// Returns the method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request Config
// ============================================================================

/// Ephemeral per-call configuration.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Headers overriding the client defaults by case-insensitive key.
    pub headers: Vec<(String, String)>,
    /// Timeout override for this call.
    pub timeout: Option<Duration>,
    /// Whether to attach the credential header. Defaults to true.
    pub auth: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: None,
            auth: true,
        }
    }
}

impl RequestConfig {
    /// Creates the default per-call configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a per-call header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables the credential header for this call.
    pub fn without_auth(mut self) -> Self {
        self.auth = false;
        self
    }
}

// ============================================================================
// Query Params
// ============================================================================

/// Insertion-ordered query parameters.
///
/// `None`-valued entries are dropped before serialization; all other values
/// are stringified.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, stringifying the value.
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Appends a parameter when the value is present; drops it otherwise.
    pub fn set_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Returns true when no parameters survived filtering.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the surviving pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// Request Body
// ============================================================================

/// The outbound body.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON-serialized body.
    Json(Value),
    /// Raw text body, passed through unmodified.
    Text(String),
    /// Multipart form, passed through so the transport sets the boundary.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serializes a value into a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value)
            .map_err(|e| ApiError::parse(0, format!("failed to serialize request body: {e}")))?;
        Ok(Self::Json(value))
    }

    /// Returns true for multipart bodies.
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// An owned multipart form, independent of any transport.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    /// Form parts in order.
    pub parts: Vec<MultipartPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            filename: None,
            content_type: None,
            data: value.into().into_bytes(),
        });
        self
    }

    /// Adds a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            data,
        });
        self
    }
}

/// One part of a multipart form.
#[derive(Debug, Clone)]
pub struct MultipartPart {
    /// Field name.
    pub name: String,
    /// Filename for file fields.
    pub filename: Option<String>,
    /// Content type for file fields.
    pub content_type: Option<String>,
    /// Raw content.
    pub data: Vec<u8>,
}

// ============================================================================
// Tests
// ============================================================================
