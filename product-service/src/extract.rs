//! Request extractors aligned with the envelope protocol
//!
//! Axum's stock `Json` extractor answers malformed bodies with its own error
//! shape. Handlers here use [`Json`] instead, whose rejection is converted
//! into the service taxonomy so even a body that never deserialized produces
//! the uniform failure envelope.

use axum::extract::{FromRequest, Json as AxumJson, Request};
use serde::de::DeserializeOwned;

use crate::error::Error;

/// JSON body extractor whose rejection speaks the envelope protocol.
///
/// Deserialization failures surface as [`Error::InvalidParameter`], which the
/// error path renders as a 400 failure envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Returns the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor
            .map(|AxumJson(value)| Self(value))
            .map_err(|rejection| Error::invalid_parameter(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    #[derive(Debug, serde::Deserialize)]
    struct CreateBody {
        #[allow(dead_code)]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_extracts() {
        let request = json_request(r#"{"name": "ok"}"#);
        let result = <Json<CreateBody> as FromRequest<()>>::from_request(request, &()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_invalid_parameter() {
        let request = json_request("{not json");
        let error = <Json<CreateBody> as FromRequest<()>>::from_request(request, &())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::InvalidParameter(_)));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_field_maps_to_invalid_parameter() {
        let request = json_request(r#"{"other": 1}"#);
        let error = <Json<CreateBody> as FromRequest<()>>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }
}
