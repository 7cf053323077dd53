//! The uniform response envelope
//!
//! Every endpoint, success or failure, answers with the same wrapper shape so
//! a single client-side parser handles all of them:
//!
//! ```json
//! {
//!   "correlationid": "req_01h455vb4pex5vsknk084sn02q",
//!   "success": true,
//!   "error": "",
//!   "tin": "2026-08-07T09:14:02.113Z",
//!   "tout": "2026-08-07T09:14:02.118Z",
//!   "data": { ... }
//! }
//! ```
//!
//! Only the `data` payload varies: a page of products, a single product, or
//! an empty object on failure and on delete. The payload is never `null`.
//!
//! An [`EnvelopeBuilder`] is started at handler entry so `tin` and `tout`
//! bracket the operation. The correlation identifier is freshly generated per
//! envelope and is not persisted anywhere.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CorrelationId;

/// The uniform wrapper around every handler's payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Fresh per-request tracing token
    #[serde(rename = "correlationid")]
    pub correlation_id: String,
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable error message, empty on success
    pub error: String,
    /// When the operation started
    pub tin: DateTime<Utc>,
    /// When the response was built
    pub tout: DateTime<Utc>,
    /// The payload; an empty object on failure
    pub data: T,
}

/// The zero-value payload used by failure envelopes and delete responses.
///
/// Serializes as `{}` so clients can always deserialize `data` as an object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyData {}

/// Builds envelopes with timing bracketed around the operation.
///
/// Start the builder on handler entry, do the work, then seal with
/// [`success`](Self::success) or [`failure`](Self::failure).
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    correlation_id: CorrelationId,
    started: DateTime<Utc>,
}

impl EnvelopeBuilder {
    /// Start an envelope, capturing the correlation identifier and `tin` now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            started: Utc::now(),
        }
    }

    /// The instant this builder was started.
    #[must_use]
    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }

    /// The correlation identifier this envelope will carry.
    #[must_use]
    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    /// Seal a success envelope around the given payload.
    #[must_use]
    pub fn success<T>(self, data: T) -> Envelope<T> {
        Envelope {
            correlation_id: self.correlation_id.into(),
            success: true,
            error: String::new(),
            tin: self.started,
            tout: Utc::now(),
            data,
        }
    }

    /// Seal a failure envelope carrying the error message and an empty payload.
    #[must_use]
    pub fn failure(self, error: impl Into<String>) -> Envelope<EmptyData> {
        Envelope {
            correlation_id: self.correlation_id.into(),
            success: false,
            error: error.into(),
            tin: self.started,
            tout: Utc::now(),
            data: EmptyData {},
        }
    }
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self::start()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let envelope = EnvelopeBuilder::start().success(vec![1, 2, 3]);

        assert!(envelope.success);
        assert!(envelope.error.is_empty());
        assert!(envelope.correlation_id.starts_with("req_"));
        assert!(envelope.tin <= envelope.tout);
        assert_eq!(envelope.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_envelope() {
        let envelope = EnvelopeBuilder::start().failure("store unavailable");

        assert!(!envelope.success);
        assert_eq!(envelope.error, "store unavailable");
        assert!(envelope.tin <= envelope.tout);
        assert_eq!(envelope.data, EmptyData {});
    }

    #[test]
    fn test_fresh_correlation_id_per_envelope() {
        let a = EnvelopeBuilder::start().success(());
        let b = EnvelopeBuilder::start().success(());
        assert_ne!(a.correlation_id, b.correlation_id);
    }

    #[test]
    fn test_timing_brackets_the_operation() {
        let builder = EnvelopeBuilder::start();
        let started = builder.started();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let envelope = builder.success(());

        assert_eq!(envelope.tin, started);
        assert!(envelope.tout >= envelope.tin);
    }

    #[test]
    fn test_empty_data_serializes_as_object() {
        let json = serde_json::to_string(&EmptyData {}).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_envelope_roundtrip() {
        let envelope = EnvelopeBuilder::start().success(vec!["a".to_string()]);
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope<Vec<String>> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.correlation_id, envelope.correlation_id);
        assert_eq!(back.success, envelope.success);
        assert_eq!(back.tin, envelope.tin);
        assert_eq!(back.tout, envelope.tout);
        assert_eq!(back.data, envelope.data);
    }

    #[test]
    fn test_failure_roundtrip_preserves_empty_data() {
        let envelope = EnvelopeBuilder::start().failure("boom");
        let json = serde_json::to_string(&envelope).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"], serde_json::json!({}));
        assert_eq!(value["success"], serde_json::json!(false));

        let back: Envelope<EmptyData> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.error, "boom");
    }

    #[test]
    fn test_wire_field_names() {
        let envelope = EnvelopeBuilder::start().success(EmptyData {});
        let value = serde_json::to_value(&envelope).unwrap();

        for field in ["correlationid", "success", "error", "tin", "tout", "data"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }
}
