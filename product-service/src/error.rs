//! Error types and HTTP response conversion
//!
//! The service taxonomy is small and fixed:
//!
//! | Variant              | Status | Meaning                                         |
//! |----------------------|--------|-------------------------------------------------|
//! | `InvalidParameter`   | 400    | malformed page, pageSize, id, or request body   |
//! | `NotFound`           | 404    | identity or filter value absent                 |
//! | `Store`              | 500    | persistence failure, surfaced without retry     |
//! | `IdentityGeneration` | 500    | a freshly generated identity collided on insert |
//!
//! `Config` and `Io` only occur during bootstrap and abort the process; they
//! never reach a client. Every handler-facing variant converts into a failure
//! envelope via `IntoResponse`, so errors leave the service in exactly the
//! same shape as successes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::envelope::EnvelopeBuilder;
use crate::repository::RepositoryError;

/// Result type alias using the service error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Service error taxonomy
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Malformed or out-of-range request input, never retried
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested record does not exist
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Underlying persistence failure, surfaced as-is
    #[error("{0}")]
    Store(#[from] RepositoryError),

    /// Unique identity generation failed
    #[error("identity generation failed: {0}")]
    IdentityGeneration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an [`Error::InvalidParameter`].
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create an [`Error::NotFound`] for an entity and the value looked up.
    pub fn not_found(entity: &'static str, lookup: impl Into<String>) -> Self {
        Self::NotFound(entity, lookup.into())
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(..) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::IdentityGeneration(_) | Self::Config(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<figment::Error> for Error {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Store(e) => {
                tracing::error!(
                    operation = %e.operation,
                    kind = %e.kind,
                    context = ?e.context,
                    retriable = e.is_retriable(),
                    "store error: {}", e.message
                );
            }
            Error::IdentityGeneration(message) => {
                tracing::error!("identity generation failed: {}", message);
            }
            Error::NotFound(entity, lookup) => {
                tracing::debug!(entity, lookup = %lookup, "lookup missed");
            }
            Error::InvalidParameter(message) => {
                tracing::debug!("rejected request input: {}", message);
            }
            Error::Config(e) => {
                tracing::error!("configuration error: {}", e);
            }
            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
            }
        }

        let status = self.status_code();
        let envelope = EnvelopeBuilder::start().failure(self.to_string());
        (status, Json(envelope)).into_response()
    }
}
