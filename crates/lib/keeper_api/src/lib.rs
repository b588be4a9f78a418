//! # keeper_api
//!
//! HTTP API library for Keeper.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use keeper_core::auth::AuthService;
use keeper_core::secrets::VaultService;
use keeper_core::store::{SecretStore, UserStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, secrets, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub vault: Arc<VaultService>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Wire the services over the given stores.
    pub fn new(
        config: ApiConfig,
        users: Arc<dyn UserStore>,
        secrets: Arc<dyn SecretStore>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users, config.tokens.clone())),
            vault: Arc::new(VaultService::new(secrets)),
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_HEALTH, get(health::health))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler));

    // Any valid access token
    let protected = Router::new()
        .route(routes::GET_USERS_ID, get(users::get_user_handler))
        .route(routes::POST_SECRETS, post(secrets::create_secret_handler))
        .route(
            routes::SECRETS_ID,
            get(secrets::get_secret_handler).delete(secrets::delete_secret_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // Token subject must match the {user_id} segment
    let owner_only = Router::new()
        .route(
            routes::GET_SECRETS_USER_ID,
            get(secrets::list_user_secrets_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_owner,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(owner_only)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
