//! Authentication Middleware
//!
//! Resolves the `X-Token` header into a `Caller` once per request and
//! stores it in the request extensions for the extractors.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// Session token from the request headers, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Attach the caller to the request.
///
/// Requests without a usable session continue as anonymous; the handlers
/// decide whether that is enough. Only cache/database failures abort here.
pub async fn resolve_caller(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = state
        .gate
        .authenticate(token_from_headers(request.headers()))
        .await?;

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}
