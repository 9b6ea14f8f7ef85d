//! Payloads carried by realtime events. Each event carries only the minimal
//! delta the UI needs to refresh.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::{GamePhase, Route};

/// Broadcast whenever the set of identified connections changes.
#[derive(Debug, Serialize, ToSchema)]
pub struct PresenceEvent {
    /// Players currently identified on a live connection.
    pub online: Vec<Uuid>,
}

/// Broadcast when a tag has been poisoned.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagPoisonedEvent {
    /// Affected tag.
    pub nfc_id: String,
    /// Epoch milliseconds the poison window runs until.
    pub until: u64,
}

/// Broadcast when a detective has cleared a poison.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagUnpoisonedEvent {
    /// Affected tag.
    pub nfc_id: String,
}

/// Broadcast when a tag has been safe-marked.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagSafeEvent {
    /// Affected tag.
    pub nfc_id: String,
    /// Epoch milliseconds the safe window runs until.
    pub until: u64,
}

/// Broadcast when a correct passphrase collected a clue letter.
#[derive(Debug, Serialize, ToSchema)]
pub struct LetterCollectedEvent {
    /// Tag the letter was collected at.
    pub id: String,
    /// Route the letter belongs to.
    pub route: Route,
    /// 1-based slot along the route.
    pub index: u32,
    /// The collected letter.
    #[schema(value_type = String)]
    pub letter: char,
}

/// Broadcast when a player has been struck down.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDownEvent {
    /// The downed player.
    pub target_id: Uuid,
}

/// Broadcast when a player has been revived.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReviveEvent {
    /// The revived player.
    pub target_id: Uuid,
}

/// Broadcast when the run lifecycle changes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEvent {
    /// New phase.
    pub phase: GamePhase,
    /// Epoch milliseconds the run started at.
    pub started_at: Option<u64>,
}

/// Broadcast when the end-game code has been solved.
#[derive(Debug, Serialize, ToSchema)]
pub struct WinEvent {
    /// Player the solvers accused.
    pub accused: Option<String>,
}
