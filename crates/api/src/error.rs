use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use climate_core::error::CoreError;
use serde::Serialize;
use serde_json::json;

/// Problem type URI for 401 responses (RFC 9110 section 15.5.2).
pub const UNAUTHORIZED_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.2";

/// RFC 9457 problem detail body.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds request body rejections.
/// Implements [`IntoResponse`] so handlers can return it directly.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `climate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be read as the expected JSON payload.
    #[error("Malformed body: {0}")]
    MalformedBody(#[from] JsonRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::Unauthorized(detail)) => unauthorized(detail),
            AppError::Core(CoreError::InvalidField { field, message }) => {
                let errors = BTreeMap::from([(field, vec![message])]);
                (StatusCode::BAD_REQUEST, axum::Json(errors)).into_response()
            }
            AppError::Core(CoreError::Validation(msg)) => {
                error_body(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal()
            }
            AppError::MalformedBody(rejection) => {
                error_body(rejection.status(), "INVALID_BODY", rejection.body_text())
            }
        }
    }
}

fn unauthorized(detail: String) -> Response {
    let body = ProblemDetails {
        problem_type: UNAUTHORIZED_PROBLEM_TYPE,
        title: "Unauthorized",
        status: StatusCode::UNAUTHORIZED.as_u16(),
        detail,
    };
    (
        StatusCode::UNAUTHORIZED,
        [(CONTENT_TYPE, HeaderValue::from_static("application/problem+json"))],
        axum::Json(body),
    )
        .into_response()
}

fn error_body(status: StatusCode, code: &str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

fn internal() -> Response {
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
