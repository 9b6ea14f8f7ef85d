use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dao::models::{GameDocument, GamePhase, Medbay, Route},
    state::clock::{self, Act},
};

/// Public snapshot of the running game returned by `GET /api/game`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Coarse run lifecycle.
    pub phase: GamePhase,
    /// Epoch milliseconds the run started at, when it has.
    pub started_at: Option<u64>,
    /// Current act, when the run has started.
    pub act: Option<Act>,
    /// Collected reward letters per route.
    #[schema(value_type = Object)]
    pub letters: IndexMap<Route, Vec<Option<char>>>,
    /// Truth badges the team may still spend.
    pub truth_badges_left: u32,
    /// Safe marks the team may still place.
    pub safe_marks_left: u32,
    /// Clue syncs left per route.
    #[schema(value_type = Object)]
    pub clue_sync_left: IndexMap<Route, u32>,
    /// Where down players wait out their timer.
    pub medbay: Medbay,
}

impl GameView {
    /// Build the snapshot from the game document at `now`.
    pub fn from_document(game: &GameDocument, now: u64) -> Self {
        Self {
            phase: game.phase,
            started_at: game.started_at,
            act: clock::act_at(game.started_at, now),
            letters: game.letters.clone(),
            truth_badges_left: game.truth_badges_left,
            safe_marks_left: game.safe_marks_left,
            clue_sync_left: game.clue_sync_left.clone(),
            medbay: game.medbay.clone(),
        }
    }
}
