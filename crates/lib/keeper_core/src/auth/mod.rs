//! Authentication: password hashing, bearer tokens and the
//! register/login flows built on them.

pub mod jwt;
pub mod password;
pub mod service;

use thiserror::Error;

pub use service::{AuthService, TokenConfig};

use crate::store::StoreError;
use jwt::TokenError;

/// Unusable token settings, reported at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenConfigError {
    #[error("access token secret is empty")]
    EmptyAccessSecret,

    #[error("refresh token secret is empty")]
    EmptyRefreshSecret,

    #[error("access and refresh token secrets must differ")]
    SharedSecret,

    #[error("token lifetimes must be positive")]
    NonPositiveTtl,
}

/// Authentication errors.
///
/// `UserNotFound` and `WrongPassword` stay distinct here for logging; the
/// HTTP layer reports both as the same "invalid credentials" outcome.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}
