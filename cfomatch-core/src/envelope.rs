//! API response envelope codec.
//!
//! Every response body exchanged with the backend is one of exactly two
//! shapes, discriminated by a literal boolean `success` field:
//!
//! ```text
//! Success: {"success": true,  "data": <T>, "message"?, "meta"?}
//! Error:   {"success": false, "error": {"message", "code"?, "details"?}, "debug"?}
//! ```
//!
//! [`Envelope`] models the pair as a tagged union so callers match on the
//! branch instead of probing a runtime boolean. Deserialization is strict:
//! `success` must be a JSON boolean, so `{"success": "true"}` parses as
//! neither shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ErrorCode;

// ============================================================================
// Discriminant Validation
// ============================================================================

fn expect_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    if bool::deserialize(deserializer)? {
        Ok(true)
    } else {
        Err(serde::de::Error::custom("expected `success` to be true"))
    }
}

fn expect_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    if bool::deserialize(deserializer)? {
        Err(serde::de::Error::custom("expected `success` to be false"))
    } else {
        Ok(false)
    }
}

/// Returns true iff `value` is an object whose `success` key is the literal
/// boolean `true`. A string `"true"` does not count.
pub fn is_success_response(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get("success"))
        .is_some_and(|s| *s == Value::Bool(true))
}

/// Returns true iff `value` is an object whose `success` key is the literal
/// boolean `false`.
pub fn is_error_response(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get("success"))
        .is_some_and(|s| *s == Value::Bool(false))
}

// ============================================================================
// Envelope
// ============================================================================

/// A decoded response body: either branch, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// The success shape.
    Success(SuccessEnvelope<T>),
    /// The error shape.
    Error(ErrorEnvelope),
}

impl<T> Envelope<T> {
    /// Returns true if this is the success branch.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

// ============================================================================
// Success Envelope
// ============================================================================

fn default_success_status() -> u16 {
    200
}

/// The `{success: true}` response shape.
///
/// `message` and `meta` are omitted from the JSON entirely when unset,
/// never emitted as null-valued keys. The HTTP status travels alongside the
/// body and is not part of the wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Discriminant, always `true`.
    #[serde(deserialize_with = "expect_true")]
    pub success: bool,
    /// The payload.
    pub data: T,
    /// Optional human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional response metadata (pagination, stats).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// HTTP status to send with this body. Not serialized.
    #[serde(skip, default = "default_success_status")]
    pub status: u16,
}

impl<T> SuccessEnvelope<T> {
    /// Creates a success envelope around `data` with status 200.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            meta: None,
            status: 200,
        }
    }

    /// Attaches a human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches response metadata.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Overrides the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

impl<T> SuccessEnvelope<Vec<T>> {
    /// Creates a paginated success envelope.
    ///
    /// `totalPages` is the ceiling of `total / limit` (0 when `limit` is 0).
    pub fn paginated(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let pagination = Pagination::new(page, limit, total);
        Self::new(data).with_meta(Meta {
            pagination: Some(pagination),
            stats: None,
            extra: Map::new(),
        })
    }

    /// Adds a stats map under `meta`, preserving existing pagination.
    pub fn with_stats(mut self, stats: Map<String, Value>) -> Self {
        let meta = self.meta.get_or_insert_with(Meta::default);
        meta.stats = Some(stats);
        self
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Response metadata nested under `meta`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Pagination details for list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Free-form stats map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Map<String, Value>>,
    /// Any additional metadata keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pagination block under `meta.pagination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total matching items.
    pub total: u64,
    /// Total pages, `ceil(total / limit)`.
    pub total_pages: u64,
}

impl Pagination {
    /// Computes the pagination block for the given window.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

// ============================================================================
// Error Envelope
// ============================================================================

fn default_error_status() -> u16 {
    500
}

/// The `{success: false}` response shape.
///
/// The `debug` payload is attached only in debug builds; release builds
/// never emit the key regardless of caller intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Discriminant, always `false`.
    #[serde(deserialize_with = "expect_false")]
    pub success: bool,
    /// The error payload.
    pub error: ErrorBody,
    /// Debug-build-only diagnostic payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    /// HTTP status to send with this body. Not serialized.
    #[serde(skip, default = "default_error_status")]
    pub status: u16,
}

/// The nested `error` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Optional structured payload (e.g. field-level validation issues).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    /// Creates an error envelope with the given message and status 500.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                message: message.into(),
                code: None,
                details: None,
            },
            debug: None,
            status: 500,
        }
    }

    /// Overrides the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error.message = message.into();
        self
    }

    /// Sets the machine-readable code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.error.code = Some(code);
        self
    }

    /// Attaches structured details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.error.details = Some(details);
        self
    }

    /// Overrides the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attaches a diagnostic payload in debug builds only.
    ///
    /// In a release build this is a no-op, so diagnostics can never leak
    /// into production responses.
    pub fn with_debug(mut self, debug: Value) -> Self {
        if cfg!(debug_assertions) {
            self.debug = Some(debug);
        }
        self
    }

    // ------------------------------------------------------------------
    // Common-error catalog
    // ------------------------------------------------------------------

    /// 401 `UNAUTHORIZED`.
    pub fn unauthorized() -> Self {
        Self::new("Authentication required")
            .with_code(ErrorCode::Unauthorized)
            .with_status(401)
    }

    /// 403 `FORBIDDEN`.
    pub fn forbidden() -> Self {
        Self::new("Access denied")
            .with_code(ErrorCode::Forbidden)
            .with_status(403)
    }

    /// 400 `BAD_REQUEST`.
    pub fn bad_request() -> Self {
        Self::new("Invalid request")
            .with_code(ErrorCode::BadRequest)
            .with_status(400)
    }

    /// 404 `NOT_FOUND`.
    pub fn not_found() -> Self {
        Self::new("Resource not found")
            .with_code(ErrorCode::NotFound)
            .with_status(404)
    }

    /// 409 `CONFLICT`.
    pub fn conflict() -> Self {
        Self::new("Resource conflict")
            .with_code(ErrorCode::Conflict)
            .with_status(409)
    }

    /// 422 `VALIDATION_ERROR`.
    pub fn validation() -> Self {
        Self::new("Validation failed")
            .with_code(ErrorCode::ValidationError)
            .with_status(422)
    }

    /// 500 `INTERNAL_ERROR`.
    pub fn internal() -> Self {
        Self::new("Internal server error")
            .with_code(ErrorCode::InternalError)
            .with_status(500)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicates_are_mutually_exclusive() {
        let success = json!({"success": true, "data": 1});
        let error = json!({"success": false, "error": {"message": "boom"}});

        assert!(is_success_response(&success));
        assert!(!is_error_response(&success));
        assert!(is_error_response(&error));
        assert!(!is_success_response(&error));
    }

    #[test]
    fn test_predicates_reject_non_envelopes() {
        for value in [
            Value::Null,
            json!(42),
            json!("success"),
            json!({"success": "true"}),
            json!({"success": "false"}),
            json!({"success": 1}),
            json!([true]),
        ] {
            assert!(!is_success_response(&value), "{value}");
            assert!(!is_error_response(&value), "{value}");
        }
    }

    #[test]
    fn test_success_serialization_omits_absent_keys() {
        let envelope = SuccessEnvelope::new(vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!([1, 2, 3]));
        assert!(value.get("message").is_none());
        assert!(value.get("meta").is_none());
        assert!(value.get("status").is_none());
    }

    #[test]
    fn test_success_serialization_includes_message_when_set() {
        let envelope = SuccessEnvelope::new(1).with_message("created").with_status(201);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["message"], json!("created"));
        assert_eq!(envelope.status, 201);
    }

    #[test]
    fn test_pagination_ceiling() {
        assert_eq!(Pagination::new(1, 10, 50).total_pages, 5);
        assert_eq!(Pagination::new(1, 10, 53).total_pages, 6);
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 0, 50).total_pages, 0);
    }

    #[test]
    fn test_paginated_envelope_shape() {
        let envelope = SuccessEnvelope::paginated(vec!["a", "b"], 1, 10, 53);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["meta"]["pagination"]["page"], json!(1));
        assert_eq!(value["meta"]["pagination"]["limit"], json!(10));
        assert_eq!(value["meta"]["pagination"]["total"], json!(53));
        assert_eq!(value["meta"]["pagination"]["totalPages"], json!(6));
        assert!(value["meta"].get("stats").is_none());
    }

    #[test]
    fn test_debug_payload_gated_on_build_profile() {
        let envelope = ErrorEnvelope::new("boom").with_debug(json!({"stack": "..."}));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(envelope.debug.is_some(), cfg!(debug_assertions));
        assert_eq!(value.get("debug").is_some(), cfg!(debug_assertions));
    }

    #[test]
    fn test_common_error_catalog() {
        let cases = [
            (ErrorEnvelope::unauthorized(), 401, ErrorCode::Unauthorized),
            (ErrorEnvelope::forbidden(), 403, ErrorCode::Forbidden),
            (ErrorEnvelope::bad_request(), 400, ErrorCode::BadRequest),
            (ErrorEnvelope::not_found(), 404, ErrorCode::NotFound),
            (ErrorEnvelope::conflict(), 409, ErrorCode::Conflict),
            (ErrorEnvelope::validation(), 422, ErrorCode::ValidationError),
            (ErrorEnvelope::internal(), 500, ErrorCode::InternalError),
        ];
        for (envelope, status, code) in cases {
            assert_eq!(envelope.status, status);
            assert_eq!(envelope.error.code, Some(code));
        }
    }

    #[test]
    fn test_catalog_accepts_overrides() {
        let envelope = ErrorEnvelope::not_found()
            .with_message("no such profile")
            .with_details(json!({"targetUserId": "u1"}));

        assert_eq!(envelope.error.message, "no such profile");
        assert_eq!(envelope.error.details, Some(json!({"targetUserId": "u1"})));
        assert_eq!(envelope.status, 404);
    }

    #[test]
    fn test_envelope_discriminates_on_decode() {
        let success: Envelope<Vec<u32>> =
            serde_json::from_value(json!({"success": true, "data": [1]})).unwrap();
        assert!(success.is_success());

        let error: Envelope<Vec<u32>> = serde_json::from_value(
            json!({"success": false, "error": {"message": "boom", "code": "NOT_FOUND"}}),
        )
        .unwrap();
        match error {
            Envelope::Error(envelope) => {
                assert_eq!(envelope.error.code, Some(ErrorCode::NotFound));
            }
            Envelope::Success(_) => panic!("expected error branch"),
        }
    }

    #[test]
    fn test_string_discriminant_fails_to_decode() {
        let result: Result<Envelope<Value>, _> =
            serde_json::from_value(json!({"success": "true", "data": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_error_envelope_round_trip() {
        let envelope = ErrorEnvelope::conflict().with_details(json!({"existing": "i-1"}));
        let text = serde_json::to_string(&envelope).unwrap();
        let parsed: ErrorEnvelope = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed.error.code, Some(ErrorCode::Conflict));
        assert_eq!(parsed.error.details, Some(json!({"existing": "i-1"})));
        // Status is transport-level, so a parsed body gets the default.
        assert_eq!(parsed.status, 500);
    }
}
