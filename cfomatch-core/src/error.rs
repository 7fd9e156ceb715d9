//! Client-side failure taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::envelope::ErrorEnvelope;

// ============================================================================
// Error Codes
// ============================================================================

/// Machine-readable failure codes.
///
/// The first three are produced client-side by the fetch layer; the catalog
/// codes are produced server-side; any other server-supplied code is carried
/// verbatim in [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transport or timeout failure; no HTTP status was obtained.
    NetworkError,
    /// The response body could not be decoded.
    ParseError,
    /// Non-2xx response that did not carry a well-formed error envelope.
    HttpError,
    /// 401.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 400.
    BadRequest,
    /// 404.
    NotFound,
    /// 409, e.g. a duplicate interest.
    Conflict,
    /// 422.
    ValidationError,
    /// 500.
    InternalError,
    /// Any other server-supplied code, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

impl ErrorCode {
    /// Returns the wire form of this code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::ParseError => "PARSE_ERROR",
            Self::HttpError => "HTTP_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Api Error
// ============================================================================

/// A normalized API failure.
///
/// Constructed exclusively inside the fetch client: transport failures,
/// timeouts, undecodable bodies, and error envelopes all funnel into this
/// one shape, so callers above the client never see raw transport errors or
/// malformed JSON.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message} (status {status})")]
pub struct ApiError {
    /// HTTP status; 0 when no response was obtained.
    pub status: u16,
    /// Machine-readable code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Optional structured payload from the server.
    pub details: Option<Value>,
    /// True when `message` was authored by the server (taken from an error
    /// envelope body); false when the client synthesized it. Display layers
    /// show server messages and substitute generic wording for synthesized
    /// ones.
    pub server_message: bool,
}

impl ApiError {
    /// Transport or timeout failure (status 0).
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            code: ErrorCode::NetworkError,
            message: message.into(),
            details: None,
            server_message: false,
        }
    }

    /// Undecodable body on an otherwise-delivered response.
    pub fn parse(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: ErrorCode::ParseError,
            message: message.into(),
            details: None,
            server_message: false,
        }
    }

    /// Non-2xx response without a well-formed error envelope.
    pub fn http(status: u16, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            status,
            code: ErrorCode::HttpError,
            message: message.into(),
            details,
            server_message: false,
        }
    }

    /// Builds from a well-formed error envelope, propagating the server's
    /// message, code, and details. An envelope without a code maps to
    /// [`ErrorCode::HttpError`], but the message still counts as
    /// server-authored.
    pub fn from_error_envelope(status: u16, envelope: &ErrorEnvelope) -> Self {
        Self {
            status,
            code: envelope.error.code.clone().unwrap_or(ErrorCode::HttpError),
            message: envelope.error.message.clone(),
            details: envelope.error.details.clone(),
            server_message: true,
        }
    }

    /// Returns true if this failure indicates an invalid or expired session.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.code == ErrorCode::Unauthorized
    }
}

// ============================================================================
// Tests
// ============================================================================
