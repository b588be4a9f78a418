//! User lookup.

use axum::Json;
use axum::extract::{Path, State};
use keeper_core::models::auth::User;

use super::parse_id;
use crate::AppState;
use crate::error::{AppError, AppResult};

/// `GET /v1.0/users/{id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let id = parse_id(&id)?;
    let user = state
        .auth
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;
    Ok(Json(user))
}
