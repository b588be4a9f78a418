//! The secret vault.
//!
//! [`VaultService`] stores typed payloads through a [`SecretStore`],
//! converting them to and from their JSON documents with [`codec`].

pub mod codec;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::auth::UserId;
use crate::models::secret::{Secret, SecretId, SecretRow};
use crate::store::{SecretStore, StoreError};
use codec::{CodecError, SecretPayload};

/// Vault errors.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Stored data could not be decoded, or a payload could not be encoded.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

fn decode_row(row: SecretRow) -> Result<Secret, VaultError> {
    let payload = codec::decode(&row.data)?;
    Ok(Secret {
        id: row.id,
        owner_id: row.owner_id,
        title: row.title,
        payload,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// CRUD over vault entries.
pub struct VaultService {
    secrets: Arc<dyn SecretStore>,
}

impl VaultService {
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        Self { secrets }
    }

    /// Store a new secret for `owner_id`.
    ///
    /// The caller is responsible for `owner_id` being the authenticated user.
    pub async fn create(
        &self,
        owner_id: UserId,
        title: &str,
        payload: &SecretPayload,
    ) -> Result<SecretId, VaultError> {
        let document = codec::encode(payload)?;
        let id = self.secrets.create(owner_id, title, &document).await?;
        info!(secret_id = id, owner_id, kind = payload.kind(), "created secret");
        Ok(id)
    }

    /// Fetch one secret. `Ok(None)` means there is no such id.
    pub async fn get_by_id(&self, id: SecretId) -> Result<Option<Secret>, VaultError> {
        match self.secrets.get_by_id(id).await? {
            Some(row) => decode_row(row).map(Some),
            None => {
                debug!(secret_id = id, "secret not found");
                Ok(None)
            }
        }
    }

    /// All secrets of `owner_id`, newest first. One undecodable row fails
    /// the whole call.
    pub async fn get_all_by_owner(&self, owner_id: UserId) -> Result<Vec<Secret>, VaultError> {
        self.secrets
            .get_all_by_owner(owner_id)
            .await?
            .into_iter()
            .map(decode_row)
            .collect()
    }

    /// Delete a secret. Missing ids are not an error.
    pub async fn delete_by_id(&self, id: SecretId) -> Result<(), VaultError> {
        self.secrets.delete_by_id(id).await?;
        info!(secret_id = id, "deleted secret");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::secrets::codec::{Card, LoginPassword};
    use crate::store::memory::MemorySecretStore;

    fn vault() -> (Arc<MemorySecretStore>, VaultService) {
        let store = Arc::new(MemorySecretStore::new());
        (store.clone(), VaultService::new(store))
    }

    #[tokio::test]
    async fn create_then_get_returns_same_title_and_payload() {
        let (_, vault) = vault();
        let payload = SecretPayload::LoginPassword(LoginPassword {
            login: "alice".into(),
            password: "hunter2".into(),
        });

        let id = vault.create(10, "mail", &payload).await.unwrap();
        let secret = vault.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(secret.id, id);
        assert_eq!(secret.owner_id, 10);
        assert_eq!(secret.title, "mail");
        assert_eq!(secret.payload, payload);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found_and_delete_again_succeeds() {
        let (_, vault) = vault();
        let id = vault
            .create(10, "note", &SecretPayload::Text("hello".into()))
            .await
            .unwrap();

        vault.delete_by_id(id).await.unwrap();
        assert!(vault.get_by_id(id).await.unwrap().is_none());
        vault.delete_by_id(id).await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_id_is_none() {
        let (_, vault) = vault();
        assert!(vault.get_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_all_by_owner_without_secrets_is_empty() {
        let (_, vault) = vault();
        assert!(vault.get_all_by_owner(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_all_by_owner_filters_and_orders_newest_first() {
        let (_, vault) = vault();
        let a = vault
            .create(10, "a", &SecretPayload::Text("a".into()))
            .await
            .unwrap();
        vault
            .create(11, "other", &SecretPayload::Text("x".into()))
            .await
            .unwrap();
        let b = vault
            .create(
                10,
                "b",
                &SecretPayload::Card(Card {
                    number: "4111111111111111".into(),
                    holder: "ALICE DOE".into(),
                    expire_date: "12/29".into(),
                    cvv: "123".into(),
                }),
            )
            .await
            .unwrap();

        let secrets = vault.get_all_by_owner(10).await.unwrap();
        let ids: Vec<SecretId> = secrets.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b, a]);
        assert!(secrets.iter().all(|s| s.owner_id == 10));
    }

    #[tokio::test]
    async fn corrupted_document_is_a_codec_error_not_not_found() {
        let (store, vault) = vault();
        let id = store.insert_raw(10, "broken", json!({"text": 42})).await;
        let err = vault.get_by_id(id).await.unwrap_err();
        assert!(matches!(err, VaultError::Codec(CodecError::Decode(_))));
    }

    #[tokio::test]
    async fn one_corrupted_row_fails_the_whole_listing() {
        let (store, vault) = vault();
        vault
            .create(10, "ok", &SecretPayload::Text("fine".into()))
            .await
            .unwrap();
        store.insert_raw(10, "broken", json!({})).await;
        let err = vault.get_all_by_owner(10).await.unwrap_err();
        assert!(matches!(err, VaultError::Codec(_)));
    }

    #[tokio::test]
    async fn binary_payload_is_stored_as_base64_document() {
        let (store, vault) = vault();
        let id = vault
            .create(10, "blob", &SecretPayload::Binary(b"hi".to_vec()))
            .await
            .unwrap();
        let row = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.data, json!({"binary": "aGk="}));
    }
}
