//! Request, response, and event payload types for the HTTP and realtime
//! surfaces.

pub mod actions;
pub mod chat;
pub mod common;
pub mod contact;
pub mod game;
pub mod health;
pub mod player;
pub mod push;
pub mod sse;
pub mod survey;
pub mod tag;
pub mod validation;
