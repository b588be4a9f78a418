//! Registration and login flows.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use super::{AuthError, TokenConfigError};
use super::jwt::issue_token;
use super::password::{hash_password, verify_password};
use crate::models::auth::{NewUser, Registration, TokenPair, User, UserId};
use crate::store::UserStore;

/// Signing secrets and lifetimes for the two token kinds.
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// Check the settings are usable: both secrets set and different from
    /// each other, both lifetimes positive.
    pub fn validate(&self) -> Result<(), TokenConfigError> {
        if self.access_secret.is_empty() {
            return Err(TokenConfigError::EmptyAccessSecret);
        }
        if self.refresh_secret.is_empty() {
            return Err(TokenConfigError::EmptyRefreshSecret);
        }
        if self.access_secret == self.refresh_secret {
            return Err(TokenConfigError::SharedSecret);
        }
        if self.access_ttl <= Duration::zero() || self.refresh_ttl <= Duration::zero() {
            return Err(TokenConfigError::NonPositiveTtl);
        }
        Ok(())
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Orchestrates registration and login against a [`UserStore`].
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenConfig) -> Self {
        Self { users, tokens }
    }

    /// Create a user and log them straight in.
    ///
    /// Input format and password confirmation are checked by the caller.
    /// Store failures (e.g. a taken user name) come back unchanged.
    pub async fn register(&self, registration: Registration) -> Result<TokenPair, AuthError> {
        let password_hash = hash_password(&registration.password);
        if password_hash.is_empty() {
            return Err(AuthError::Internal("password hashing failed".into()));
        }

        let created = self
            .users
            .create(&NewUser {
                user_name: registration.user_name,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
            })
            .await?;

        info!(user_id = created.id, user_name = %created.user_name, "registered user");
        self.mint_pair(created.id)
    }

    /// Authenticate with user name + password.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.users.get_by_user_name(user_name).await? else {
            debug!(user_name, "login: no such user");
            return Err(AuthError::UserNotFound);
        };

        if !verify_password(password, &user.password_hash) {
            debug!(user_id = user.id, "login: password mismatch");
            return Err(AuthError::WrongPassword);
        }

        info!(user_id = user.id, "user logged in");
        self.mint_pair(user.id)
    }

    /// Issue an access + refresh token pair for `user_id`.
    pub fn mint_pair(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let subject = user_id.to_string();
        let access_token = issue_token(
            self.tokens.access_secret.as_bytes(),
            &subject,
            self.tokens.access_ttl,
        )?;
        let refresh_token = issue_token(
            self.tokens.refresh_secret.as_bytes(),
            &subject,
            self.tokens.refresh_ttl,
        )?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Look up a user profile by id.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.get_by_id(id).await?)
    }
}
