use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::{Route, TagCard};

/// Currently-visible tag content returned by `GET /api/nfc/{id}`. The
/// poison window alone decides which content variant the reader sees.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagView {
    /// Tag identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Clue track the tag belongs to.
    pub route: Route,
    /// 1-based position along the route.
    pub index: u32,
    /// Whether the tag is currently poisoned.
    pub poisoned: bool,
    /// Whether the tag is currently safe-marked.
    pub safe: bool,
    /// Riddle pointing at the next location, from the visible variant.
    pub next_riddle: String,
    /// Passphrase prompt, from the visible variant.
    pub pass_prompt: String,
}

impl TagView {
    /// Project a card through its current poison/safe windows.
    pub fn from_card(card: &TagCard, poisoned: bool, safe: bool) -> Self {
        let content = if poisoned { &card.decoy } else { &card.normal };
        Self {
            id: card.id.clone(),
            title: card.title.clone(),
            route: card.route,
            index: card.index,
            poisoned,
            safe,
            next_riddle: content.next_riddle.clone(),
            pass_prompt: content.pass_prompt.clone(),
        }
    }
}

/// Body of `POST /api/nfc/{id}/attempt`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRequest {
    /// Player making the attempt, when the client knows it.
    #[serde(default)]
    pub player_id: Option<Uuid>,
    /// Submitted passphrase.
    pub passphrase: String,
}

/// Outcome of a passphrase attempt. A mismatch is a normal result, not an
/// error, so repeated guesses stay cheap.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttemptResponse {
    /// Whether the passphrase matched.
    pub ok: bool,
    /// Awarded letter on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub letter: Option<char>,
}

/// Body of `POST /api/final`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FinalRequest {
    /// Submitted end-game code.
    pub code: String,
    /// Player the submitters accuse.
    #[serde(default)]
    pub accused: Option<String>,
}

/// Outcome of the end-game code check.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinalResponse {
    /// Whether the code matched.
    pub ok: bool,
}
