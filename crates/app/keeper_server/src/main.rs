//! Keeper API server binary.
//!
//! Reads its settings from flags, the environment and an optional `.env`
//! file, then serves the vault API until Ctrl-C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use keeper_api::config::ApiConfig;
use keeper_core::auth::TokenConfig;
use keeper_core::store::memory::{MemorySecretStore, MemoryUserStore};
use keeper_core::store::postgres::{PgSecretStore, PgUserStore};
use keeper_core::store::{SecretStore, UserStore};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "keeper_server", about = "Keeper secret vault API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "SERVER_ADDRESS", default_value = "127.0.0.1:8080")]
    address: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/keeper"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Keep users and secrets in process memory instead of PostgreSQL.
    /// Everything is lost on exit.
    #[arg(long, default_value_t = false)]
    in_memory: bool,

    /// Signing secret for access tokens.
    #[arg(long, env = "ACCESS_TOKEN_SECRET", hide_env_values = true)]
    access_token_secret: String,

    /// Signing secret for refresh tokens. Must differ from the access secret.
    #[arg(long, env = "REFRESH_TOKEN_SECRET", hide_env_values = true)]
    refresh_token_secret: String,

    /// Access token lifetime (e.g. "15m").
    #[arg(long, env = "ACCESS_TOKEN_EXPIRES", default_value = "15m", value_parser = humantime::parse_duration)]
    access_token_expires: Duration,

    /// Refresh token lifetime (e.g. "720h").
    #[arg(long, env = "REFRESH_TOKEN_EXPIRES", default_value = "720h", value_parser = humantime::parse_duration)]
    refresh_token_expires: Duration,
}

impl Args {
    fn token_config(&self) -> Result<TokenConfig, Box<dyn std::error::Error>> {
        let tokens = TokenConfig {
            access_secret: self.access_token_secret.clone(),
            refresh_secret: self.refresh_token_secret.clone(),
            access_ttl: chrono::Duration::from_std(self.access_token_expires)?,
            refresh_ttl: chrono::Duration::from_std(self.refresh_token_expires)?,
        };
        tokens.validate()?;
        Ok(tokens)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,keeper_api=debug,keeper_core=debug".into()),
        )
        .init();

    let args = Args::parse();
    let tokens = args.token_config()?;

    info!(
        version = keeper_core::version(),
        address = %args.address,
        in_memory = args.in_memory,
        access_ttl = %humantime::format_duration(args.access_token_expires),
        refresh_ttl = %humantime::format_duration(args.refresh_token_expires),
        "starting keeper_server"
    );

    let users: Arc<dyn UserStore>;
    let secrets: Arc<dyn SecretStore>;
    if args.in_memory {
        warn!("in-memory mode: data will not survive a restart");
        users = Arc::new(MemoryUserStore::new());
        secrets = Arc::new(MemorySecretStore::new());
    } else {
        info!(max_connections = args.max_connections, "configuring connection pool");
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&args.database_url)
            .await?;

        info!("running database migrations");
        keeper_core::migrate::migrate(&pool).await?;

        users = Arc::new(PgUserStore::new(pool.clone()));
        secrets = Arc::new(PgSecretStore::new(pool));
    }

    let config = ApiConfig {
        bind_addr: args.address.clone(),
        tokens,
    };
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = keeper_api::router(keeper_api::AppState::new(config, users, secrets));

    info!(addr = %local_addr, "REST API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        let mut argv = vec![
            "keeper_server",
            "--access-token-secret",
            "access",
            "--refresh-token-secret",
            "refresh",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn durations_use_humantime() {
        let args = parse(&["--access-token-expires", "90s", "--refresh-token-expires", "2h"])
            .expect("parse");
        assert_eq!(args.access_token_expires, Duration::from_secs(90));
        assert_eq!(args.refresh_token_expires, Duration::from_secs(7200));
    }

    #[test]
    fn malformed_duration_is_rejected() {
        assert!(parse(&["--access-token-expires", "soon"]).is_err());
    }

    #[test]
    fn identical_secrets_fail_startup() {
        let args = Args::try_parse_from([
            "keeper_server",
            "--access-token-secret",
            "same",
            "--refresh-token-secret",
            "same",
        ])
        .expect("parse");
        assert!(args.token_config().is_err());
    }

    #[test]
    fn token_config_converts_lifetimes() {
        let args = parse(&["--access-token-expires", "15m"]).expect("parse");
        let tokens = args.token_config().expect("valid config");
        assert_eq!(tokens.access_ttl, chrono::Duration::minutes(15));
    }
}
