use std::sync::Arc;

use anyhow::Context;

use crate::app::{app, AppState};
use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgGameStore};

pub async fn handle(config: &AppConfig, port: Option<u16>, host: Option<String>) -> anyhow::Result<()> {
    tracing::info!("Starting Game API in {:?} mode", config.environment);

    let jwt = JwtKeys::from_secret(&config.security.jwt_secret, config.security.jwt_expiry_hours)
        .context("JWT_SECRET must be set")?;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the game database")?;
    let games = PgGameStore::new(config.database.games_table.clone(), pool)?;
    tracing::info!("Serving games from table {}", games.table_name());

    let state = AppState::new(Arc::new(games), jwt);
    let router = app(state, config);

    let bind_addr = format!(
        "{}:{}",
        host.as_deref().unwrap_or(&config.server.host),
        port.unwrap_or(config.server.port)
    );
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Game API listening on http://{}", bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
