use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A stored game, addressed by (cohort, id) and owned by the uploading user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub cohort: String,
    pub id: String,
    pub owner: String,
    pub owner_display_name: String,
    pub white: String,
    pub black: String,
    pub date: String,
    pub pgn: String,
    pub unlisted: bool,
    /// PGN tag pairs as a JSON object
    pub headers: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
