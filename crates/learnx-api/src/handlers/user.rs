//! Current-user handler

use axum::{extract::State, Json};

use crate::dto::ProfileResponse;
use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// GET /api/user/me (behind `require_auth`)
pub async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.auth_service.current_user(&user.user_id).await?;
    Ok(Json(profile.into()))
}
