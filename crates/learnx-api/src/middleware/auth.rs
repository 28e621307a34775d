//! Authentication Middleware
//!
//! Verifies the bearer token and stores the subject in request extensions
//! for protected handlers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use learnx_core::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

/// Subject of a verified session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// `Ok(None)` when the header is absent, `Ok(Some(""))` for a bare scheme.
/// Any other scheme, or a non-ASCII header, is an invalid token.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, DomainError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| DomainError::InvalidToken)?.trim();

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("Bearer") {
        warn!(event = "auth.invalid_header", "Unsupported Authorization scheme");
        return Err(DomainError::InvalidToken);
    }

    Ok(Some(token.trim()))
}

/// Middleware that requires a valid session token
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;
    let user_id = state.auth_service.verify(token)?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(ApiError::Domain(DomainError::MissingToken))
    }
}
