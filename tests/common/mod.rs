use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use game_api::auth::JwtKeys;
use game_api::config::AppConfig;
use game_api::database::{Game, GameDeleter, StoreError};
use game_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";

/// In-memory game store that records every delete call
#[derive(Default)]
pub struct MemoryGames {
    games: Mutex<HashMap<(String, String), Game>>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl MemoryGames {
    pub fn with_games(games: impl IntoIterator<Item = Game>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.games.lock().unwrap();
            for game in games {
                map.insert((game.cohort.clone(), game.id.clone()), game);
            }
        }
        Arc::new(store)
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contains(&self, cohort: &str, id: &str) -> bool {
        self.games
            .lock()
            .unwrap()
            .contains_key(&(cohort.to_string(), id.to_string()))
    }
}

#[async_trait]
impl GameDeleter for MemoryGames {
    async fn delete_game(&self, owner: &str, cohort: &str, id: &str) -> Result<Game, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((owner.to_string(), cohort.to_string(), id.to_string()));

        let mut games = self.games.lock().unwrap();
        let key = (cohort.to_string(), id.to_string());
        let stored_owner = games.get(&key).map(|game| game.owner.clone());
        match stored_owner {
            None => Err(StoreError::NotFound("Invalid request: game not found".to_string())),
            Some(stored) if stored != owner => Err(StoreError::Forbidden(
                "Invalid request: game does not belong to the current user".to_string(),
            )),
            Some(_) => Ok(games.remove(&key).expect("present")),
        }
    }
}

pub fn game(owner: &str, cohort: &str, id: &str) -> Game {
    Game {
        cohort: cohort.to_string(),
        id: id.to_string(),
        owner: owner.to_string(),
        owner_display_name: owner.to_uppercase(),
        white: owner.to_string(),
        black: "opponent".to_string(),
        date: "2024.03.01".to_string(),
        pgn: "1. d4 d5 2. c4 *".to_string(),
        unlisted: false,
        headers: json!({ "Event": "Club night", "Result": "*" }),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
        updated_at: None,
    }
}

pub fn keys() -> JwtKeys {
    JwtKeys::from_secret(SECRET, 1).expect("valid secret")
}

pub fn router(games: Arc<MemoryGames>) -> Router {
    app(AppState::new(games, keys()), &AppConfig::from_env())
}

pub fn bearer(username: &str) -> String {
    format!("Bearer {}", keys().generate(username).expect("token"))
}

pub async fn send(router: Router, method: Method, uri: &str, auth: Option<String>) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    let response = router.oneshot(builder.body(Body::empty())?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, body))
}
