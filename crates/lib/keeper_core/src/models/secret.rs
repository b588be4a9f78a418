//! Vault domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::UserId;
use crate::secrets::codec::SecretPayload;

/// Numeric secret id (`secrets.id`).
pub type SecretId = i64;

/// A decoded vault entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub id: SecretId,
    #[serde(rename = "user_id")]
    pub owner_id: UserId,
    pub title: String,
    #[serde(rename = "data")]
    pub payload: SecretPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for `secrets`; `data` is the undecoded JSONB document.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SecretRow {
    pub id: SecretId,
    pub owner_id: UserId,
    pub title: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
