// src/routes/mod.rs

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

pub mod backup;
pub mod health;
pub mod inbound;
pub mod occupancy;
pub mod outbound;
pub mod reports;
pub mod users;
pub mod warehouses;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, error: String, details: Option<String>) -> ApiError {
    (status, Json(ErrorBody { error, details }))
}

/// 500 with a generic body; the actual cause goes to the server log only.
pub fn internal_error<E: std::fmt::Display>(e: E) -> ApiError {
    tracing::error!(%e, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string(), None)
}

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, msg.into(), None)
}

pub fn not_found(entity: &str, id: i64) -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        format!("{entity} not found"),
        Some(format!("{entity}_id {id}")),
    )
}

/// Shared response for delete endpoints.
#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_body_is_generic() {
        let (status, Json(body)) = internal_error("connection refused (host=db)");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal error");
        assert!(body.details.is_none());
    }

    #[test]
    fn not_found_carries_the_id_in_details() {
        let (status, Json(body)) = not_found("user", 42);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "user not found");
        assert_eq!(body.details.as_deref(), Some("user_id 42"));
    }

    #[test]
    fn details_are_omitted_from_json_when_absent() {
        let body = ErrorBody { error: "invalid year: twenty".into(), details: None };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"invalid year: twenty"}"#
        );
    }
}
