//! Entry point: load config, wire dependencies, and run the server.

use proconnect::auth::TokenService;
use proconnect::config::Config;
use proconnect::db::{self, PgUserStore};
use proconnect::{create_app, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::connect(&config).await?;
    let users = Arc::new(PgUserStore::new(db_pool));
    let tokens = TokenService::new(config.auth_secret.clone(), config.token_ttl_secs);

    let state = AppState::new(users, tokens);
    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
