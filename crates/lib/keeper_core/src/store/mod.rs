//! Persistence collaborators.
//!
//! The services only see the [`UserStore`] and [`SecretStore`] traits.
//! [`postgres`] is the production backend; [`memory`] backs tests and the
//! server's `--in-memory` mode.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{NewUser, User, UserCredentials, UserId};
use crate::models::secret::{SecretId, SecretRow};

/// Store errors, surfaced to callers with the backend's detail.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Identity persistence. Soft-deleted users are invisible to every lookup.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch login data by exact (case-sensitive) user name.
    async fn get_by_user_name(&self, user_name: &str)
    -> Result<Option<UserCredentials>, StoreError>;

    /// Fetch a user profile by id.
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Insert a new user. A taken user name yields [`StoreError::Duplicate`].
    async fn create(&self, user: &NewUser) -> Result<UserCredentials, StoreError>;
}

/// Secret persistence. Documents are stored as opaque JSON.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn create(
        &self,
        owner_id: UserId,
        title: &str,
        data: &serde_json::Value,
    ) -> Result<SecretId, StoreError>;

    async fn get_by_id(&self, id: SecretId) -> Result<Option<SecretRow>, StoreError>;

    /// All secrets of one owner, newest first.
    async fn get_all_by_owner(&self, owner_id: UserId) -> Result<Vec<SecretRow>, StoreError>;

    /// Delete by id; deleting a missing id is not an error.
    async fn delete_by_id(&self, id: SecretId) -> Result<(), StoreError>;
}
