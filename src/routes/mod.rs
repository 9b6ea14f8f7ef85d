use axum::Router;

use crate::state::SharedState;

pub mod actions;
pub mod contact;
pub mod docs;
pub mod game;
pub mod health;
pub mod players;
pub mod push;
pub mod sse;
pub mod survey;
pub mod tags;
pub mod websocket;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(websocket::router())
        .merge(game::router())
        .merge(actions::router())
        .merge(tags::router())
        .merge(players::router())
        .merge(survey::router())
        .merge(contact::router())
        .merge(push::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
