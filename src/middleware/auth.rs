// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authorization schemes accepted in front of the token key.
const SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// Authenticated user resolved from the request token.
///
/// Handlers load the current profile from the store by `user_id`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Extract the key from an `Authorization: Token <key>` header value.
fn token_from_header(value: &str) -> Option<&str> {
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    if !SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) || key.is_empty() {
        return None;
    }
    Some(key)
}

/// Middleware that requires a valid token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let key = token_from_header(header_value).ok_or(AppError::InvalidToken)?;
    let user = state.accounts.resolve_token(key).await?;

    let auth_user = AuthUser { user_id: user.id };
    tracing::debug!(user_id = %auth_user.user_id, "Request authenticated");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_header() {
        assert_eq!(token_from_header("Token abc123"), Some("abc123"));
        assert_eq!(token_from_header("Bearer abc123"), Some("abc123"));
        assert_eq!(token_from_header("token  abc123 "), Some("abc123"));
        assert_eq!(token_from_header("Basic dXNlcjpwYXNz"), None);
        assert_eq!(token_from_header("Token"), None);
        assert_eq!(token_from_header("abc123"), None);
    }
}
