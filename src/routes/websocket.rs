use axum::{
    Json, Router,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};

use crate::{dto::chat::MessagesResponse, services::websocket_service, state::SharedState};

/// Routes for the realtime socket and the chat backlog.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/api/messages", get(recent_messages))
}

#[utoipa::path(
    get,
    path = "/ws",
    tag = "realtime",
    responses((status = 101, description = "Switching protocols to WebSocket"))
)]
/// Upgrade the HTTP connection into a realtime session.
pub async fn ws_handler(
    State(state): State<SharedState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let shared_state = state.clone();
    ws.on_upgrade(move |socket| websocket_service::handle_socket(shared_state, socket))
}

#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "realtime",
    responses((status = 200, description = "Recent chat messages", body = MessagesResponse))
)]
/// Return the most recent chat messages for late joiners.
pub async fn recent_messages(State(state): State<SharedState>) -> Json<MessagesResponse> {
    Json(MessagesResponse {
        messages: websocket_service::recent_messages(&state).await,
    })
}
