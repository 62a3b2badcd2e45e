use crate::errors::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

/// JSON body extractor whose rejections use the standard error body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameter extractor whose rejections use the standard error body.
#[derive(Debug)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Body;

    #[derive(Validate)]
    struct Quantity {
        #[validate(range(min = 1))]
        value: i32,
    }

    #[test]
    fn validate_input_maps_to_validation_error() {
        assert!(validate_input(&Quantity { value: 1 }).is_ok());
        assert_matches!(
            validate_input(&Quantity { value: 0 }),
            Err(ApiError::ValidationError(msg)) if msg.starts_with("Validation failed")
        );
    }

    #[derive(Debug, serde::Deserialize)]
    struct Item {
        product_id: i32,
    }

    #[tokio::test]
    async fn malformed_json_body_becomes_validation_error() {
        let req = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"product_id":"abc"}"#))
            .unwrap();

        let rejection = JsonBody::<Item>::from_request(req, &()).await.unwrap_err();
        assert_matches!(rejection, ApiError::ValidationError(msg) if msg.contains("product_id"));
    }

    #[tokio::test]
    async fn well_formed_json_body_is_extracted() {
        let req = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"product_id":3}"#))
            .unwrap();

        let JsonBody(item) = JsonBody::<Item>::from_request(req, &()).await.unwrap();
        assert_eq!(item.product_id, 3);
    }
}
