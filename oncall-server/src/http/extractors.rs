//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{Payload, ValidationError};

/// JSON object body.
///
/// No `Content-Type` is required. An empty body reads as `{}`; anything
/// that is not a JSON object is rejected with 400.
pub struct JsonPayload(pub Payload);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidBody {
                reason: e.body_text(),
            })
        })?;

        parse_body(&bytes).map(Self).map_err(ApiError::Validation)
    }
}

fn parse_body(bytes: &[u8]) -> Result<Payload, ValidationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::default());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(Payload::new(map)),
        Ok(_) => Err(ValidationError::InvalidBody {
            reason: "expected a JSON object".into(),
        }),
        Err(e) => Err(ValidationError::InvalidBody {
            reason: e.to_string(),
        }),
    }
}

/// Query string extractor that rejects with an error envelope.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "query",
                    reason: "malformed query string",
                })
            })?;
        Ok(Self(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(parse_body(b"").unwrap(), Payload::default());
        assert_eq!(parse_body(b"  \n").unwrap(), Payload::default());
    }

    #[test]
    fn object_body() {
        let payload = parse_body(br#"{"id": 3}"#).unwrap();
        assert!(payload.has("id"));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            parse_body(b"[1, 2]"),
            Err(ValidationError::InvalidBody { .. })
        ));
        assert!(matches!(
            parse_body(b"{not json"),
            Err(ValidationError::InvalidBody { .. })
        ));
    }
}
