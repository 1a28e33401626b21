use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseManager, StoreError};
use crate::database::models::Game;

const GAME_COLUMNS: &str = "cohort, id, owner, owner_display_name, white, black, date, pgn, \
                            unlisted, headers, created_at, updated_at";

/// Storage capability used by the delete handler
#[async_trait]
pub trait GameDeleter: Send + Sync {
    /// Delete the game at (cohort, id) if it belongs to `owner`, returning the removed record
    async fn delete_game(&self, owner: &str, cohort: &str, id: &str) -> Result<Game, StoreError>;
}

/// Postgres-backed game store
#[derive(Clone)]
pub struct PgGameStore {
    table_name: String,
    pool: PgPool,
}

impl PgGameStore {
    pub fn new(table_name: impl Into<String>, pool: PgPool) -> Result<Self, StoreError> {
        let table_name = table_name.into();
        if !DatabaseManager::is_valid_table_name(&table_name) {
            return Err(StoreError::InvalidTable(table_name));
        }
        Ok(Self { table_name, pool })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl GameDeleter for PgGameStore {
    async fn delete_game(&self, owner: &str, cohort: &str, id: &str) -> Result<Game, StoreError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE cohort = $1 AND id = $2 AND owner = $3 RETURNING {}",
            self.table_name, GAME_COLUMNS
        );

        let deleted = sqlx::query_as::<_, Game>(&sql)
            .bind(cohort)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(game) = deleted {
            tracing::info!(cohort, id, owner, "Deleted game");
            return Ok(game);
        }

        // Nothing removed: tell a foreign game apart from a missing one
        let sql = format!(
            "SELECT owner FROM \"{}\" WHERE cohort = $1 AND id = $2",
            self.table_name
        );
        let existing = sqlx::query_scalar::<_, String>(&sql)
            .bind(cohort)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match existing {
            Some(_) => Err(StoreError::Forbidden(
                "Invalid request: game does not belong to the current user".to_string(),
            )),
            None => Err(StoreError::NotFound(
                "Invalid request: game not found".to_string(),
            )),
        }
    }
}
