// ============================================================================
// LearnX API - Auth Handlers
// File: crates/learnx-api/src/handlers/auth.rs
// ============================================================================
//! Sign-up and sign-in handlers

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;

use crate::dto::{SignInRequest, SignUpRequest, TokenResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Sign-up handler - POST /api/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let Json(payload) = payload?;

    let session = state
        .auth_service
        .sign_up(&payload.username, &payload.email, &payload.password)
        .await?;

    info!("Signed up user {}", session.subject);

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token: session.token,
        }),
    ))
}

/// Sign-in handler - POST /api/auth/signin
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(payload) = payload?;

    let session = state
        .auth_service
        .sign_in(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenResponse {
        token: session.token,
    }))
}
