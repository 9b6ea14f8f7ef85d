//! Broadcast helpers. One function per event type; every successful mutation
//! calls exactly one of these after its persistence call has been issued.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dao::models::{ChatMessage, GamePhase, Route},
    dto::{
        chat::ChatMessageView,
        sse::{
            LetterCollectedEvent, PhaseEvent, PlayerDownEvent, PlayerReviveEvent, PresenceEvent,
            TagPoisonedEvent, TagSafeEvent, TagUnpoisonedEvent, WinEvent,
        },
    },
    state::{ServerEvent, SharedState},
};

const EVENT_PRESENCE: &str = "presence";
const EVENT_CHAT_NEW: &str = "chat:new";
const EVENT_TAG_POISONED: &str = "nfc:poisoned";
const EVENT_TAG_UNPOISONED: &str = "nfc:unpoisoned";
const EVENT_TAG_SAFE: &str = "nfc:safe";
const EVENT_LETTER_COLLECTED: &str = "letter:collected";
const EVENT_PLAYER_DOWN: &str = "player:down";
const EVENT_PLAYER_REVIVE: &str = "player:revive";
const EVENT_PHASE: &str = "game:phase";
const EVENT_WIN: &str = "game:win";

/// Broadcast the set of players currently identified on a live connection.
pub fn broadcast_presence(state: &SharedState) {
    let payload = PresenceEvent {
        online: state.online_players(),
    };
    send_event(state, EVENT_PRESENCE, &payload);
}

/// Broadcast a freshly accepted chat message.
pub fn broadcast_chat_message(state: &SharedState, message: &ChatMessage) {
    let payload = ChatMessageView::from(message);
    send_event(state, EVENT_CHAT_NEW, &payload);
}

/// Broadcast that a tag has been poisoned.
pub fn broadcast_tag_poisoned(state: &SharedState, nfc_id: &str, until: u64) {
    let payload = TagPoisonedEvent {
        nfc_id: nfc_id.to_string(),
        until,
    };
    send_event(state, EVENT_TAG_POISONED, &payload);
}

/// Broadcast that a tag's poison has been cleared.
pub fn broadcast_tag_unpoisoned(state: &SharedState, nfc_id: &str) {
    let payload = TagUnpoisonedEvent {
        nfc_id: nfc_id.to_string(),
    };
    send_event(state, EVENT_TAG_UNPOISONED, &payload);
}

/// Broadcast that a tag has been safe-marked.
pub fn broadcast_tag_safe(state: &SharedState, nfc_id: &str, until: u64) {
    let payload = TagSafeEvent {
        nfc_id: nfc_id.to_string(),
        until,
    };
    send_event(state, EVENT_TAG_SAFE, &payload);
}

/// Broadcast a collected clue letter.
pub fn broadcast_letter_collected(
    state: &SharedState,
    id: &str,
    route: Route,
    index: u32,
    letter: char,
) {
    let payload = LetterCollectedEvent {
        id: id.to_string(),
        route,
        index,
        letter,
    };
    send_event(state, EVENT_LETTER_COLLECTED, &payload);
}

/// Broadcast that a player has been struck down.
pub fn broadcast_player_down(state: &SharedState, target_id: Uuid) {
    let payload = PlayerDownEvent { target_id };
    send_event(state, EVENT_PLAYER_DOWN, &payload);
}

/// Broadcast that a player has been revived.
pub fn broadcast_player_revive(state: &SharedState, target_id: Uuid) {
    let payload = PlayerReviveEvent { target_id };
    send_event(state, EVENT_PLAYER_REVIVE, &payload);
}

/// Broadcast a run lifecycle change.
pub fn broadcast_phase(state: &SharedState, phase: GamePhase, started_at: Option<u64>) {
    let payload = PhaseEvent { phase, started_at };
    send_event(state, EVENT_PHASE, &payload);
}

/// Broadcast that the end-game code has been solved.
pub fn broadcast_win(state: &SharedState, accused: Option<String>) {
    let payload = WinEvent { accused };
    send_event(state, EVENT_WIN, &payload);
}

fn send_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(event, payload) {
        Ok(event) => state.hub().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize event payload"),
    }
}
