//! Request and response bodies.

use keeper_core::models::secret::SecretId;
use keeper_core::secrets::codec::SecretPayload;
use serde::{Deserialize, Serialize};

/// `POST /v1.0/auth/login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// `POST /v1.0/auth/register` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

/// `POST /v1.0/secrets` body. The owner is always the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSecretRequest {
    pub title: String,
    pub data: SecretPayload,
}

/// `POST /v1.0/secrets` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSecretResponse {
    pub id: SecretId,
}

/// Error body for every non-2xx response produced by a handler, a gate or a
/// JSON body extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
