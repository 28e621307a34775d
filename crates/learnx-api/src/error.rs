//! Mapping of domain failures onto HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use learnx_core::DomainError;

use crate::response::MessageResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::DuplicateUsername(_)
                | DomainError::DuplicateEmail(_)
                | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::InvalidCredentials | DomainError::MissingToken => {
                    StatusCode::UNAUTHORIZED
                }
                DomainError::InvalidToken => StatusCode::FORBIDDEN,
                DomainError::UserNotFound => StatusCode::NOT_FOUND,
                DomainError::StoreUnavailable(_) | DomainError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MalformedBody(_) => "MALFORMED_BODY",
            ApiError::Domain(err) => err.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Infrastructure detail stays in the logs.
        let message = match &self {
            ApiError::Domain(err) if err.is_server_fault() => {
                error!(code = self.code(), "Request failed: {}", err);
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(MessageResponse::new(message, self.code()))).into_response()
    }
}
