//! In-memory stores with the same contract as the PostgreSQL ones.
//!
//! Ids are assigned from 1 upwards per store. Data lives as long as the
//! store value and is never persisted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{SecretStore, StoreError, UserStore};
use crate::auth::password::HashedCredential;
use crate::models::auth::{NewUser, User, UserCredentials, UserId};
use crate::models::secret::{SecretId, SecretRow};

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: HashedCredential,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    fn credentials(&self) -> UserCredentials {
        UserCredentials {
            id: self.user.id,
            user_name: self.user.user_name.clone(),
            password_hash: self.password_hash.clone(),
        }
    }
}

/// In-memory [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user as deleted. Returns false if no live user has this id.
    pub async fn soft_delete(&self, id: UserId) -> bool {
        let mut users = self.users.write().await;
        match users
            .iter_mut()
            .find(|r| r.user.id == id && r.deleted_at.is_none())
        {
            Some(record) => {
                record.deleted_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|r| r.deleted_at.is_none() && r.user.user_name == user_name)
            .map(UserRecord::credentials))
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|r| r.deleted_at.is_none() && r.user.id == id)
            .map(|r| r.user.clone()))
    }

    async fn create(&self, user: &NewUser) -> Result<UserCredentials, StoreError> {
        let mut users = self.users.write().await;
        // The unique index covers deleted rows too.
        if users.iter().any(|r| r.user.user_name == user.user_name) {
            return Err(StoreError::Duplicate(format!(
                "user '{}' already exists",
                user.user_name
            )));
        }
        let now = Utc::now();
        let record = UserRecord {
            user: User {
                id: users.len() as UserId + 1,
                user_name: user.user_name.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                created_at: now,
                updated_at: now,
            },
            password_hash: user.password_hash.clone(),
            deleted_at: None,
        };
        let credentials = record.credentials();
        users.push(record);
        Ok(credentials)
    }
}

#[derive(Debug, Default)]
struct SecretTable {
    next_id: SecretId,
    rows: Vec<SecretRow>,
}

/// In-memory [`SecretStore`].
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    table: RwLock<SecretTable>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row verbatim, bypassing the codec. Lets tests plant
    /// documents the vault would never write itself.
    pub async fn insert_raw(
        &self,
        owner_id: UserId,
        title: &str,
        data: serde_json::Value,
    ) -> SecretId {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let now = Utc::now();
        let row = SecretRow {
            id: table.next_id,
            owner_id,
            title: title.to_string(),
            data,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(row);
        table.next_id
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn create(
        &self,
        owner_id: UserId,
        title: &str,
        data: &serde_json::Value,
    ) -> Result<SecretId, StoreError> {
        Ok(self.insert_raw(owner_id, title, data.clone()).await)
    }

    async fn get_by_id(&self, id: SecretId) -> Result<Option<SecretRow>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn get_all_by_owner(&self, owner_id: UserId) -> Result<Vec<SecretRow>, StoreError> {
        let table = self.table.read().await;
        let mut rows: Vec<SecretRow> = table
            .rows
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn delete_by_id(&self, id: SecretId) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        table.rows.retain(|r| r.id != id);
        Ok(())
    }
}
