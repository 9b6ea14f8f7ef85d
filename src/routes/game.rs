use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{common::AckResponse, game::GameView},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes exposing the game snapshot and the game-master start switch.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/game", get(get_game))
        .route("/api/gm/start", post(start_run))
}

#[utoipa::path(
    get,
    path = "/api/game",
    tag = "game",
    responses((status = 200, description = "Current game snapshot", body = GameView))
)]
/// Return the public snapshot of the running game.
pub async fn get_game(State(state): State<SharedState>) -> Json<GameView> {
    Json(game_service::game_view(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/gm/start",
    tag = "game",
    responses((status = 200, description = "Run started", body = AckResponse))
)]
/// Start the run: sets the phase to RUN and stamps the start time.
pub async fn start_run(State(state): State<SharedState>) -> Result<Json<AckResponse>, AppError> {
    game_service::start_run(&state).await?;
    Ok(Json(AckResponse::ok()))
}
