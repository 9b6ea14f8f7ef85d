use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of `POST /api/poison`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoisonRequest {
    /// Acting killer.
    pub killer_id: Uuid,
    /// Target tag.
    pub nfc_id: String,
}

/// Body of `POST /api/unpoison`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnpoisonRequest {
    /// Acting detective.
    pub detective_id: Uuid,
    /// Target tag.
    pub nfc_id: String,
}

/// Body of `POST /api/safe-mark`. The acting player is recorded in the
/// request but any player may spend a team safe mark.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafeMarkRequest {
    /// Acting player.
    pub player_id: Uuid,
    /// Target tag.
    pub nfc_id: String,
}

/// Body of `POST /api/kill`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KillRequest {
    /// Acting killer.
    pub killer_id: Uuid,
    /// Player being struck down.
    pub target_id: Uuid,
}

/// Body of `POST /api/revive`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviveRequest {
    /// Acting detective.
    pub detective_id: Uuid,
    /// Player being brought back up.
    pub target_id: Uuid,
}
