use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::{
        common::AckResponse,
        push::{PushSubscribeRequest, PushUnsubscribeRequest},
    },
    error::AppError,
    services::push_service,
    state::SharedState,
};

/// Routes for push subscription bookkeeping.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/push/subscribe", post(push_subscribe))
        .route("/api/push/unsubscribe", post(push_unsubscribe))
}

#[utoipa::path(
    post,
    path = "/api/push/subscribe",
    tag = "push",
    request_body = PushSubscribeRequest,
    responses((status = 200, description = "Subscription stored", body = AckResponse))
)]
/// Store or refresh a player's push subscription.
pub async fn push_subscribe(
    State(state): State<SharedState>,
    Json(payload): Json<PushSubscribeRequest>,
) -> Result<Json<AckResponse>, AppError> {
    push_service::subscribe(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/push/unsubscribe",
    tag = "push",
    request_body = PushUnsubscribeRequest,
    responses((status = 200, description = "Subscription dropped", body = AckResponse))
)]
/// Drop a player's push subscription.
pub async fn push_unsubscribe(
    State(state): State<SharedState>,
    Json(payload): Json<PushUnsubscribeRequest>,
) -> Result<Json<AckResponse>, AppError> {
    push_service::unsubscribe(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}
