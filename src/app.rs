use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderName, Request},
    middleware,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::GameDeleter;
use crate::handlers::game;
use crate::middleware::jwt_auth_middleware;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared handler dependencies; the game store is injected, never global
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<dyn GameDeleter>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(games: Arc<dyn GameDeleter>, jwt: JwtKeys) -> Self {
        Self { games, jwt }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected
        .merge(game_routes(state.clone()))
        .with_state(state);

    let router = if config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Tag every request span with the id set by `SetRequestIdLayer`
fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

fn game_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/game/:cohort/:id", delete(game::game_delete))
        // An empty id segment still gets the "id is required" response
        .route("/game/:cohort", delete(game::game_delete))
        .route("/game/:cohort/", delete(game::game_delete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Game API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "game": "DELETE /game/:cohort/:id (protected, id is base64 encoded)",
            }
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
