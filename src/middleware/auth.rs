use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};

use crate::auth::{validate_jwt, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;

/// Guard for protected routes: a handler taking an `AuthUser` only runs once
/// the bearer token verifies and the user it names still exists.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_from_headers(&parts.headers).map_err(|msg| {
            tracing::debug!("Rejected request to {}: {}", parts.uri.path(), msg);
            ApiError::unauthorized(msg)
        })?;

        let claims = validate_jwt(&token, &state.config.security).map_err(|e| {
            tracing::warn!("Rejected token on {}: {}", parts.uri.path(), e);
            ApiError::unauthorized("Unauthorized")
        })?;

        let user = state.users.find_user(claims.sub).await?.ok_or_else(|| {
            tracing::warn!("Token for unknown user {} on {}", claims.sub, parts.uri.path());
            ApiError::unauthorized("Unauthorized")
        })?;

        Ok(AuthUser::from(user))
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
