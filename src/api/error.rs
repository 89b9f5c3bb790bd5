//! HTTP mapping of `DomainError`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::QueryRejection;
use serde_json::{json, Map, Value};

use crate::domain::DomainError;

/// A query string that cannot be decoded at all is not tied to one field.
impl From<QueryRejection> for DomainError {
    fn from(rejection: QueryRejection) -> Self {
        DomainError::validation("non_field_errors", rejection.to_string())
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match self {
            DomainError::Validation { field, message } => {
                let mut errors = Map::new();
                errors.insert(field.to_string(), json!([message]));
                (StatusCode::BAD_REQUEST, Json(Value::Object(errors))).into_response()
            }
            DomainError::Conflict { code, message } => (
                StatusCode::CONFLICT,
                Json(json!({ "code": code, "detail": message })),
            )
                .into_response(),
            DomainError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Not found." })),
            )
                .into_response(),
            DomainError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Authentication credentials were not provided." })),
            )
                .into_response(),
            DomainError::MethodNotAllowed(message) => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "error": message })),
            )
                .into_response(),
            DomainError::Database(_) | DomainError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "An internal error occurred." })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_keyed_by_field() {
        let response =
            DomainError::validation("country_code", "This query parameter is required.")
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            json!({ "country_code": ["This query parameter is required."] })
        );
    }

    #[tokio::test]
    async fn internal_details_do_not_leak() {
        let response = DomainError::Database("disk I/O error at /var/db".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body, json!({ "detail": "An internal error occurred." }));
    }

    #[tokio::test]
    async fn conflict_carries_a_stable_code() {
        let response = DomainError::conflict("duplicate_favorite", "already there").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_of(response).await["code"], "duplicate_favorite");
    }
}
