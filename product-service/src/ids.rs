//! Type-safe identifiers using the TypeID specification
//!
//! Identifiers combine the uniqueness of UUIDs with a readable type prefix,
//! following the [TypeID Specification](https://github.com/jetpack-io/typeid/blob/main/spec/SPEC.md).
//!
//! Two identifier types exist:
//!
//! - [`ProductId`]: the identity of a catalog product (`prod_` prefix).
//!   Generated server-side on create and immutable afterwards.
//! - [`CorrelationId`]: a per-request tracing token (`req_` prefix), stamped
//!   into every response envelope and used as the HTTP request id.
//!
//! Both use UUIDv7, so identifiers sort by creation time.
//!
//! ```rust
//! use product_service::ids::ProductId;
//!
//! let id = ProductId::new();
//! assert!(id.as_str().starts_with("prod_"));
//! ```

use http::Request;
use mti::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};

/// The identity of a product record.
///
/// Format: `prod_<base32-encoded-uuidv7>`, e.g. `prod_01h455vb4pex5vsknk084sn02q`.
/// The identity is assigned by the server when a product is created and never
/// changes afterwards. Any identity supplied by a client on create is ignored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(MagicTypeId);

impl ProductId {
    /// The prefix used for product identifiers
    pub const PREFIX: &'static str = "prod";

    /// Creates a new product identifier with a UUIDv7 (time-sortable).
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the prefix portion of the identifier.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.prefix().as_str()
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mti = MagicTypeId::from_str(s).map_err(IdError::Parse)?;

        if mti.prefix().as_str() != Self::PREFIX {
            return Err(IdError::InvalidPrefix {
                expected: Self::PREFIX.to_string(),
                actual: mti.prefix().as_str().to_string(),
            });
        }

        Ok(Self(mti))
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0.to_string()
    }
}

// Identifiers travel as plain strings on the wire and in the database.
impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A per-request correlation identifier for tracing.
///
/// Stamped into every response envelope, success or failure, and never
/// persisted with the entity. Uses UUIDv7 so correlation identifiers are
/// time-ordered in logs.
///
/// Format: `req_<base32-encoded-uuidv7>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CorrelationId(MagicTypeId);

impl CorrelationId {
    /// The prefix used for correlation identifiers
    pub const PREFIX: &'static str = "req";

    /// Creates a new correlation identifier with a UUIDv7 (time-sortable).
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the prefix portion of the identifier.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.prefix().as_str()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CorrelationId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mti = MagicTypeId::from_str(s).map_err(IdError::Parse)?;

        if mti.prefix().as_str() != Self::PREFIX {
            return Err(IdError::InvalidPrefix {
                expected: Self::PREFIX.to_string(),
                actual: mti.prefix().as_str().to_string(),
            });
        }

        Ok(Self(mti))
    }
}

impl From<CorrelationId> for String {
    fn from(id: CorrelationId) -> Self {
        id.0.to_string()
    }
}

/// Error type for identifier parsing.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The value could not be parsed as a valid TypeID.
    #[error("failed to parse identifier: {0}")]
    Parse(#[from] MagicTypeIdError),

    /// The prefix was not the expected value.
    #[error("invalid prefix: expected '{expected}', got '{actual}'")]
    InvalidPrefix {
        /// The expected prefix.
        expected: String,
        /// The actual prefix found.
        actual: String,
    },
}

/// A `MakeRequestId` implementation that generates `CorrelationId`s for tower-http.
///
/// Used with `tower_http::request_id::SetRequestIdLayer` so every incoming
/// HTTP request carries a type-safe correlation identifier in its headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeCorrelationId;

impl MakeRequestId for MakeCorrelationId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = CorrelationId::new();
        let header_value = http::HeaderValue::from_str(id.as_str()).ok()?;
        Some(TowerRequestId::new(header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_new() {
        let id = ProductId::new();
        assert!(id.as_str().starts_with("prod_"));
        assert_eq!(id.prefix(), "prod");
        // TypeID format: prefix (4) + underscore (1) + suffix (26) = 31
        assert_eq!(id.as_str().len(), 31);
    }

    #[test]
    fn test_product_id_parse_roundtrip() {
        let id = ProductId::new();
        let parsed = ProductId::from_str(id.as_str()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_product_id_invalid_prefix() {
        let result = ProductId::from_str("user_01h455vb4pex5vsknk084sn02q");
        match result.unwrap_err() {
            IdError::InvalidPrefix { expected, actual } => {
                assert_eq!(expected, "prod");
                assert_eq!(actual, "user");
            }
            _ => panic!("Expected InvalidPrefix error"),
        }
    }

    #[test]
    fn test_product_id_invalid_format() {
        assert!(ProductId::from_str("prod_not-a-typeid").is_err());
        assert!(ProductId::from_str("").is_err());
    }

    #[test]
    fn test_product_id_ordering() {
        let id1 = ProductId::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let id2 = ProductId::new();

        // UUIDv7 IDs should be time-ordered
        assert!(id1 < id2);
    }

    #[test]
    fn test_product_id_serde_as_string() {
        let id = ProductId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_str()));

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_product_id_deserialize_rejects_bad_prefix() {
        let result: Result<ProductId, _> =
            serde_json::from_str("\"req_01h455vb4pex5vsknk084sn02q\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_correlation_id_new() {
        let id = CorrelationId::new();
        assert!(id.as_str().starts_with("req_"));
        assert_eq!(id.prefix(), "req");
    }

    #[test]
    fn test_correlation_id_uniqueness() {
        let id1 = CorrelationId::new();
        let id2 = CorrelationId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_make_correlation_id() {
        let mut maker = MakeCorrelationId;
        let request = http::Request::builder().body(()).unwrap();

        let id = maker.make_request_id(&request);
        assert!(id.is_some());

        let header_value = id.unwrap().into_header_value();
        assert!(header_value.to_str().unwrap().starts_with("req_"));
    }
}
