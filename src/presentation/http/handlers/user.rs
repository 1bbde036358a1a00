//! User Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{RegisterRequest, UserResponse};
use crate::presentation::http::extractors::{AuthUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .users
        .register(body.email.as_deref(), body.password.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get current user
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
