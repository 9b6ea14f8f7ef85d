//! Service layer: one module per concern, free functions over the shared
//! state. Mutating services follow guard, mutate, persist, broadcast — in
//! that order.

pub mod action_service;
pub mod contact_service;
pub mod documentation;
pub mod events;
pub mod game_service;
pub mod health_service;
pub mod player_service;
pub mod push_service;
pub mod sse_service;
pub mod survey_service;
pub mod tag_service;
pub mod websocket_service;
