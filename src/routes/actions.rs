use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::{
        actions::{KillRequest, PoisonRequest, ReviveRequest, SafeMarkRequest, UnpoisonRequest},
        common::AckResponse,
    },
    error::AppError,
    services::action_service,
    state::SharedState,
};

/// Routes for the timed role actions.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/poison", post(poison))
        .route("/api/unpoison", post(unpoison))
        .route("/api/safe-mark", post(safe_mark))
        .route("/api/kill", post(kill))
        .route("/api/revive", post(revive))
}

#[utoipa::path(
    post,
    path = "/api/poison",
    tag = "actions",
    request_body = PoisonRequest,
    responses(
        (status = 200, description = "Tag poisoned", body = AckResponse),
        (status = 400, description = "Safe tag, re-poison, or poison limit"),
        (status = 403, description = "Actor is not the killer")
    )
)]
/// Poison a tag so it shows decoy content for the next five minutes.
pub async fn poison(
    State(state): State<SharedState>,
    Json(payload): Json<PoisonRequest>,
) -> Result<Json<AckResponse>, AppError> {
    action_service::poison(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/unpoison",
    tag = "actions",
    request_body = UnpoisonRequest,
    responses(
        (status = 200, description = "Tag cleaned", body = AckResponse),
        (status = 400, description = "Cooldown still running"),
        (status = 403, description = "Actor is not a detective")
    )
)]
/// Clear a tag's poison window.
pub async fn unpoison(
    State(state): State<SharedState>,
    Json(payload): Json<UnpoisonRequest>,
) -> Result<Json<AckResponse>, AppError> {
    action_service::unpoison(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/safe-mark",
    tag = "actions",
    request_body = SafeMarkRequest,
    responses(
        (status = 200, description = "Tag safe-marked", body = AckResponse),
        (status = 400, description = "No safe marks left")
    )
)]
/// Spend one of the team's safe marks to shield a tag from poisoning.
pub async fn safe_mark(
    State(state): State<SharedState>,
    Json(payload): Json<SafeMarkRequest>,
) -> Result<Json<AckResponse>, AppError> {
    action_service::safe_mark(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/kill",
    tag = "actions",
    request_body = KillRequest,
    responses(
        (status = 200, description = "Target downed", body = AckResponse),
        (status = 400, description = "Cooldown still running"),
        (status = 403, description = "Actor is not the killer"),
        (status = 404, description = "Target not found")
    )
)]
/// Strike a player down for the configured number of minutes.
pub async fn kill(
    State(state): State<SharedState>,
    Json(payload): Json<KillRequest>,
) -> Result<Json<AckResponse>, AppError> {
    action_service::kill(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/revive",
    tag = "actions",
    request_body = ReviveRequest,
    responses(
        (status = 200, description = "Target revived", body = AckResponse),
        (status = 400, description = "Act revive already used"),
        (status = 403, description = "Actor is not a detective"),
        (status = 404, description = "Target not found")
    )
)]
/// Bring a downed player back up, spending the detective's act revive.
pub async fn revive(
    State(state): State<SharedState>,
    Json(payload): Json<ReviveRequest>,
) -> Result<Json<AckResponse>, AppError> {
    action_service::revive(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}
