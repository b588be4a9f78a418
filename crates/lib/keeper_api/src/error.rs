//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use keeper_core::auth::AuthError;
use keeper_core::secrets::VaultError;
use keeper_core::store::StoreError;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                m.as_str(),
            ),
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, "bad_request", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(msg) => AppError::Conflict(msg),
            StoreError::Db(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::UserNotFound | AuthError::WrongPassword => {
                warn!(reason = %e, "authentication failed");
                AppError::Unauthorized("Invalid credentials".into())
            }
            AuthError::Token(e) => AppError::Internal(e.to_string()),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<VaultError> for AppError {
    fn from(e: VaultError) -> Self {
        match e {
            VaultError::Codec(e) => AppError::Internal(e.to_string()),
            VaultError::Store(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use keeper_core::auth::jwt::TokenError;

    use super::*;

    #[test]
    fn both_login_failures_map_to_same_unauthorized() {
        let a = AppError::from(AuthError::UserNotFound);
        let b = AppError::from(AuthError::WrongPassword);
        assert_eq!(a.to_string(), b.to_string());
        assert!(matches!(a, AppError::Unauthorized(_)));
        assert_eq!(a.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(b.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn duplicate_user_is_conflict() {
        let e = AppError::from(AuthError::Store(StoreError::Duplicate("taken".into())));
        assert_eq!(e.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn signing_failure_is_internal() {
        let e = AppError::from(AuthError::Token(TokenError::Signing("empty".into())));
        assert_eq!(e.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_is_unprocessable() {
        let e = AppError::Validation("bad".into());
        assert_eq!(e.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
