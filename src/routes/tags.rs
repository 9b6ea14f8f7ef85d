use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::tag::{AttemptRequest, AttemptResponse, FinalRequest, FinalResponse, TagView},
    error::AppError,
    services::tag_service,
    state::SharedState,
};

/// Routes for tag content, passphrase attempts, and the end-game code.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/nfc/{id}", get(tag_view))
        .route("/api/nfc/{id}/attempt", post(attempt))
        .route("/api/final", post(final_code))
}

#[utoipa::path(
    get,
    path = "/api/nfc/{id}",
    tag = "tags",
    params(("id" = String, Path, description = "Tag identifier")),
    responses(
        (status = 200, description = "Currently-visible tag content", body = TagView),
        (status = 404, description = "Unknown tag")
    )
)]
/// Return the tag content a scanner currently sees, decoy or normal.
pub async fn tag_view(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TagView>, AppError> {
    let view = tag_service::tag_view(&state, &id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/nfc/{id}/attempt",
    tag = "tags",
    params(("id" = String, Path, description = "Tag identifier")),
    request_body = AttemptRequest,
    responses(
        (status = 200, description = "Attempt outcome; a mismatch is ok:false", body = AttemptResponse),
        (status = 404, description = "Unknown tag")
    )
)]
/// Check a passphrase against the tag's visible content.
pub async fn attempt(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<AttemptRequest>,
) -> Result<Json<AttemptResponse>, AppError> {
    let response = tag_service::attempt(&state, &id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/final",
    tag = "tags",
    request_body = FinalRequest,
    responses((status = 200, description = "Code check outcome", body = FinalResponse))
)]
/// Check the end-game code; a match broadcasts the win.
pub async fn final_code(
    State(state): State<SharedState>,
    Json(payload): Json<FinalRequest>,
) -> Json<FinalResponse> {
    Json(tag_service::final_code(&state, payload).await)
}
