//! PostgreSQL stores.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{SecretStore, StoreError, UserStore};
use crate::auth::password::HashedCredential;
use crate::models::auth::{NewUser, User, UserCredentials, UserId};
use crate::models::secret::{SecretId, SecretRow};

/// Map a unique-constraint violation to [`StoreError::Duplicate`].
fn map_insert_error(e: sqlx::Error, what: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Duplicate(format!("{what} already exists"))
        }
        _ => StoreError::Db(e),
    }
}

/// `users` table access.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT id, user_name, password_hash FROM users \
             WHERE user_name = $1 AND deleted_at IS NULL",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, user_name, hash)| UserCredentials {
            id,
            user_name,
            password_hash: HashedCredential::from(hash),
        }))
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, user_name, first_name, last_name, created_at, updated_at \
             FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, user: &NewUser) -> Result<UserCredentials, StoreError> {
        let (id, user_name, hash) = sqlx::query_as::<_, (i64, String, String)>(
            "INSERT INTO users (user_name, first_name, last_name, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_name, password_hash",
        )
        .bind(&user.user_name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &format!("user '{}'", user.user_name)))?;
        Ok(UserCredentials {
            id,
            user_name,
            password_hash: HashedCredential::from(hash),
        })
    }
}

/// `secrets` table access.
#[derive(Clone, Debug)]
pub struct PgSecretStore {
    pool: PgPool,
}

impl PgSecretStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SecretStore for PgSecretStore {
    async fn create(
        &self,
        owner_id: UserId,
        title: &str,
        data: &serde_json::Value,
    ) -> Result<SecretId, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO secrets (user_id, title, data) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(owner_id)
        .bind(title)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: SecretId) -> Result<Option<SecretRow>, StoreError> {
        let row = sqlx::query_as::<_, SecretRow>(
            "SELECT id, user_id AS owner_id, title, data, created_at, updated_at \
             FROM secrets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_all_by_owner(&self, owner_id: UserId) -> Result<Vec<SecretRow>, StoreError> {
        let rows = sqlx::query_as::<_, SecretRow>(
            "SELECT id, user_id AS owner_id, title, data, created_at, updated_at \
             FROM secrets WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, id: SecretId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM secrets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
