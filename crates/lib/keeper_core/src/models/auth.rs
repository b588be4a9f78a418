//! Identity and token domain models.
//!
//! These are internal domain models; request/response shapes live in
//! `keeper_api::models`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::password::HashedCredential;

/// Numeric identity id (`users.id`).
pub type UserId = i64;

/// Registered user, as returned by lookups. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal identity data needed to check a login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub user_name: String,
    pub password_hash: HashedCredential,
}

/// A user about to be inserted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub password_hash: HashedCredential,
    pub first_name: String,
    pub last_name: String,
}

/// Registration input after request validation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_name: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// JWT claims carried by both access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer label.
    pub iss: String,
    /// Subject: the user id as a decimal string.
    pub sub: String,
    /// Unique token id.
    pub jti: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// The subject parsed back into a user id.
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }
}

/// Access + refresh token pair handed out on login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
