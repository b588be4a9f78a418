//! Secret CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use keeper_core::models::secret::Secret;

use super::parse_id;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateSecretRequest, CreateSecretResponse};
use crate::validation::{ensure_valid, validate_create_secret};

/// `POST /v1.0/secrets`: store a secret owned by the caller.
pub async fn create_secret_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateSecretRequest>,
) -> AppResult<(StatusCode, Json<CreateSecretResponse>)> {
    ensure_valid(validate_create_secret(&body))?;
    let owner_id = user.user_id()?;
    let id = state.vault.create(owner_id, &body.title, &body.data).await?;
    Ok((StatusCode::CREATED, Json(CreateSecretResponse { id })))
}

/// `GET /v1.0/secrets/{id}`
pub async fn get_secret_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Secret>> {
    let id = parse_id(&id)?;
    let secret = state
        .vault
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("secret not found".into()))?;
    Ok(Json(secret))
}

/// `DELETE /v1.0/secrets/{id}`
pub async fn delete_secret_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    state.vault.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /v1.0/secrets/user/{user_id}`: every secret of one owner, newest first.
pub async fn list_user_secrets_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Secret>>> {
    let owner_id = parse_id(&user_id)?;
    let secrets = state.vault.get_all_by_owner(owner_id).await?;
    Ok(Json(secrets))
}
