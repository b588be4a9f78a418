//! API server configuration.

use keeper_core::auth::TokenConfig;

/// Configuration for the API server.
///
/// Built once by the binary and handed to [`crate::AppState::new`]; nothing
/// in this crate reads the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// Token signing secrets and lifetimes.
    pub tokens: TokenConfig,
}
