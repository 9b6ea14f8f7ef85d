use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{services::sse_service, state::SharedState};

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/events", get(event_stream))
}

#[utoipa::path(
    get,
    path = "/sse/events",
    tag = "realtime",
    responses((status = 200, description = "Realtime event stream", content_type = "text/event-stream", body = String))
)]
/// Stream every realtime event to a connected frontend.
pub async fn event_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe(&state);
    info!("new SSE connection");
    sse_service::to_sse_stream(receiver)
}
