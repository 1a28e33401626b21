// handlers/game/delete.rs - DELETE /game/:cohort/:id handler

use std::collections::HashMap;

use axum::extract::{
    path::ErrorKind,
    rejection::PathRejection,
    Extension, Path, State,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::app::AppState;
use crate::database::{Game, GameDeleter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Validated delete command, ready for the game store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteGameRequest {
    pub owner: String,
    pub cohort: String,
    /// Decoded record id
    pub id: String,
}

impl DeleteGameRequest {
    /// Build the command from path parameters. The id travels base64 encoded.
    pub fn from_path(owner: &str, params: &HashMap<String, String>) -> Result<Self, ApiError> {
        let cohort = params.get("cohort").map(String::as_str).unwrap_or_default();
        if cohort.is_empty() {
            return Err(ApiError::bad_request("Invalid request: cohort is required"));
        }

        let encoded = match params.get("id") {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ApiError::bad_request("Invalid request: id is required")),
        };

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| ApiError::bad_request_caused_by("Invalid request: id is not base64 encoded", e))?;
        let id = String::from_utf8(bytes)
            .map_err(|e| ApiError::bad_request_caused_by("Invalid request: id is not valid UTF-8", e))?;

        Ok(Self {
            owner: owner.to_string(),
            cohort: cohort.to_string(),
            id,
        })
    }
}

/// Validate the request and forward it to the store. Every outcome is a structured response.
pub async fn handle_delete(
    games: &dyn GameDeleter,
    owner: &str,
    params: &HashMap<String, String>,
) -> ApiResult<Game> {
    let request = DeleteGameRequest::from_path(owner, params).map_err(|e| {
        tracing::warn!(owner, error = %e, "Rejected delete request");
        e
    })?;

    tracing::info!(
        owner = %request.owner,
        cohort = %request.cohort,
        id = %request.id,
        "Deleting game"
    );

    let game = games
        .delete_game(&request.owner, &request.cohort, &request.id)
        .await
        .map_err(|e| {
            tracing::warn!(status = e.status_code(), error = %e, "Game store rejected delete");
            ApiError::from(e)
        })?;

    Ok(ApiResponse::success(game))
}

/// Segments axum cannot percent-decode still get the JSON error envelope
fn path_rejection_to_error(rejection: PathRejection) -> ApiError {
    let key = match &rejection {
        PathRejection::FailedToDeserializePathParams(inner) => match inner.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } => Some(key.clone()),
            _ => None,
        },
        _ => None,
    };

    let message = match key.as_deref() {
        // base64 is ASCII, so a non-UTF-8 segment cannot be a valid id
        Some("id") => "Invalid request: id is not base64 encoded",
        Some("cohort") => "Invalid request: cohort is not valid UTF-8",
        _ => "Invalid request: malformed path parameters",
    };

    ApiError::bad_request_caused_by(message, rejection)
}

/// DELETE /game/:cohort/:id - Delete one of the caller's games
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<HashMap<String, String>>, PathRejection>,
) -> ApiResult<Game> {
    let Path(params) = path.map_err(|rejection| {
        tracing::warn!(owner = %user.username, error = %rejection, "Rejected delete path");
        path_rejection_to_error(rejection)
    })?;

    handle_delete(state.games.as_ref(), &user.username, &params).await
}
