//! JSON HTTP API over the game repository.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use derive_more::Display;
use lobby_games::{GameEntity, GameStatus};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use crate::{GameFilter, GameRepository, IdleListing, RepoError};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    repository: GameRepository,
}

/// Builds the API router.
///
/// Routes:
/// - `GET /health`
/// - `GET /games?status=<tag>&player=<id>`
/// - `GET /games/idle`
/// - `GET /games/{id}`
#[instrument(skip(repository))]
pub fn router(repository: GameRepository) -> Router {
    info!("Building lobby router");
    Router::new()
        .route("/health", get(health))
        .route("/games", get(list_games))
        .route("/games/idle", get(list_idle_games))
        .route("/games/{id}", get(get_game))
        .with_state(AppState { repository })
}

/// Query string accepted by `GET /games`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Status tag, e.g. `idle` or `inProgress`.
    status: Option<String>,
    /// Player id the games must include.
    player: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> Result<GameFilter, ApiError> {
        let status = self
            .status
            .map(|s| {
                s.parse::<GameStatus>()
                    .map_err(|_| ApiError::BadRequest(format!("Unknown game status: '{}'", s)))
            })
            .transpose()?;
        Ok(GameFilter::new(status, self.player))
    }
}

/// Handler failure rendered as `{"error": "..."}`.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed request.
    #[display("{}", _0)]
    BadRequest(String),
    /// Requested game does not exist.
    #[display("{}", _0)]
    NotFound(String),
    /// Storage or mapping failure.
    #[display("{}", _0)]
    Internal(String),
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        error!(error = %err, "Repository operation failed");
        Self::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!(error = %err, "Blocking task failed");
        Self::Internal("Internal Server Error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip(state))]
async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<GameEntity>>, ApiError> {
    let filter = params.into_filter()?;
    debug!(?filter, "List games request");

    let repository = state.repository.clone();
    let games = tokio::task::spawn_blocking(move || repository.list_games(&filter)).await??;
    Ok(Json(games))
}

#[instrument(skip(state))]
async fn list_idle_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<IdleListing>>, ApiError> {
    let repository = state.repository.clone();
    let games = tokio::task::spawn_blocking(move || repository.list_idle_games()).await??;
    Ok(Json(games.iter().map(IdleListing::from).collect()))
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameEntity>, ApiError> {
    let repository = state.repository.clone();
    let lookup = id.clone();
    let game = tokio::task::spawn_blocking(move || repository.get_game(&lookup)).await??;
    match game {
        Some(game) => Ok(Json(game)),
        None => {
            warn!(game_id = %id, "Game not found");
            Err(ApiError::NotFound(format!("Game '{}' not found", id)))
        }
    }
}
