use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors reported by the game store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// HTTP status the store attaches to this failure
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Forbidden(_) => 403,
            StoreError::ConfigMissing(_) | StoreError::InvalidTable(_) => 503,
            StoreError::Sqlx(_) => 500,
        }
    }
}

/// Builds the connection pool shared by all requests
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Created database pool (max_connections={})",
            config.max_connections
        );
        Ok(pool)
    }

    /// Table names are interpolated into SQL, so only plain identifiers pass
    pub fn is_valid_table_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_name_validation() {
        assert!(DatabaseManager::is_valid_table_name("prod_games"));
        assert!(DatabaseManager::is_valid_table_name("_games2"));
        assert!(!DatabaseManager::is_valid_table_name(""));
        assert!(!DatabaseManager::is_valid_table_name("2games"));
        assert!(!DatabaseManager::is_valid_table_name("games; DROP TABLE users"));
        assert!(!DatabaseManager::is_valid_table_name("prod-games"));
    }

    #[test]
    fn status_codes() {
        assert_eq!(StoreError::NotFound("x".into()).status_code(), 404);
        assert_eq!(StoreError::Forbidden("x".into()).status_code(), 403);
        assert_eq!(StoreError::ConfigMissing("DATABASE_URL").status_code(), 503);
        assert_eq!(StoreError::Sqlx(sqlx::Error::RowNotFound).status_code(), 500);
    }

    #[tokio::test]
    async fn connect_requires_url() {
        let config = DatabaseConfig {
            url: None,
            max_connections: 1,
            connection_timeout: 1,
            games_table: "games".to_string(),
        };
        let err = DatabaseManager::connect(&config).await.unwrap_err();
        assert!(matches!(err, StoreError::ConfigMissing("DATABASE_URL")));
    }
}
