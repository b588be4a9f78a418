//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use keeper_core::models::auth::{Registration, TokenPair};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::models::{LoginRequest, RegisterRequest};
use crate::validation::{ensure_valid, validate_login, validate_register};

/// `POST /v1.0/auth/login`: exchange username and password for a token pair.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    ensure_valid(validate_login(&body))?;
    let pair = state.auth.login(&body.user_name, &body.password).await?;
    Ok(Json(pair))
}

/// `POST /v1.0/auth/register`: create an account and log it in.
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenPair>)> {
    ensure_valid(validate_register(&body))?;
    let pair = state
        .auth
        .register(Registration {
            user_name: body.user_name,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(pair)))
}
