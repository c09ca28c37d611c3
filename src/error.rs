use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the registration pipeline.
///
/// The first three variants are client-input errors rendered as
/// `400 {"error": "<message>"}` with the message taken verbatim from the
/// variant's `Display`. `Internal` covers storage and hashing failures and
/// renders generically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing {0} in request body")]
    MissingField(&'static str),
    #[error("{0}")]
    InvalidPassword(&'static str),
    #[error("That Username is already taken")]
    UserNameTaken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal(e) => {
                error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            client_error => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": client_error.to_string() })),
            )
                .into_response(),
        }
    }
}
