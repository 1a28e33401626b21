mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let router = common::router(common::MemoryGames::empty());

    let (status, body) = common::send(router, Method::GET, "/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_game_endpoint() -> Result<()> {
    let router = common::router(common::MemoryGames::empty());

    let (status, body) = common::send(router, Method::GET, "/", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["endpoints"]["game"]
        .as_str()
        .unwrap_or_default()
        .contains("/game/:cohort/:id"));
    Ok(())
}
