//! Authentication middleware: Bearer token extraction and JWT verification.
//!
//! Two gates, both run before the wrapped handler:
//! - [`require_auth`]: any valid access token.
//! - [`require_owner`]: a valid access token whose subject equals the
//!   `{user_id}` path segment.

use std::collections::HashMap;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use keeper_core::auth::jwt::{TokenError, validate_token};
use keeper_core::models::auth::{TokenClaims, UserId};
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crate::routes::OWNER_PARAM;

/// Verified claims, stored in request extensions by both gates.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    /// The token subject as a user id.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .user_id()
            .ok_or_else(|| AppError::Unauthorized("Invalid token subject".into()))
    }
}

/// Extract and validate `Authorization: Bearer <token>`.
fn authenticate(headers: &HeaderMap, secret: &[u8]) -> Result<TokenClaims, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    validate_token(token, secret).map_err(|e| {
        debug!("token rejected: {e}");
        match e {
            TokenError::Expired => AppError::Unauthorized("Token expired".into()),
            _ => AppError::Unauthorized("Invalid token".into()),
        }
    })
}

/// Axum middleware: any authenticated caller.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(
        request.headers(),
        state.config.tokens.access_secret.as_bytes(),
    )?;
    request.extensions_mut().insert(AuthenticatedUser(claims));
    Ok(next.run(request).await)
}

/// Axum middleware: the caller must own the `{user_id}` in the path.
///
/// A `{user_id}` that is not a number is let through; the handler rejects
/// it as an invalid id.
pub async fn require_owner(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(
        request.headers(),
        state.config.tokens.access_secret.as_bytes(),
    )?;

    if let Some(raw) = params.get(OWNER_PARAM)
        && raw.parse::<UserId>().is_ok()
        && *raw != claims.sub
    {
        debug!(subject = %claims.sub, requested = %raw, "owner mismatch");
        return Err(AppError::Unauthorized(
            "Resource belongs to another user".into(),
        ));
    }

    request.extensions_mut().insert(AuthenticatedUser(claims));
    Ok(next.run(request).await)
}
