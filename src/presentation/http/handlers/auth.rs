//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use crate::application::dto::TokenResponse;
use crate::presentation::http::extractors::SessionToken;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Sign in with HTTP Basic credentials (`email:password`)
pub async fn connect(
    State(state): State<AppState>,
    credentials: Result<TypedHeader<Authorization<Basic>>, TypedHeaderRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let TypedHeader(Authorization(basic)) = credentials.map_err(|_| AppError::Unauthorized)?;

    let token = state
        .auth
        .connect(basic.username(), basic.password())
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// Sign out the session behind `X-Token`
pub async fn disconnect(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<StatusCode, AppError> {
    state.auth.disconnect(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
