use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{CharacterRecord, PlayerRecord},
    dto::validation::validate_display_name,
};

/// Body of `POST /api/register`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name; sign-in later matches on the first word.
    pub name: String,
    /// Optional role label.
    #[serde(default)]
    pub role_id: Option<String>,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_display_name(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Envelope returned when a player is created.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerEnvelope {
    /// The created or resolved player.
    pub player: PlayerView,
}

/// Public projection of a player exposed to REST clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Role label, if any.
    pub role_id: Option<String>,
    /// Assigned character, if any.
    pub character_id: Option<Uuid>,
    /// Killer flag.
    pub is_killer: bool,
    /// Detective flag.
    pub is_detective: bool,
    /// Epoch milliseconds until which the player is down (0 = up).
    pub down_until: u64,
    /// Role the intake survey computed, if they took it.
    pub survey_result: Option<String>,
    /// Whether the player registered through the intake survey.
    pub survey_completed: bool,
}

impl From<&PlayerRecord> for PlayerView {
    fn from(record: &PlayerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            role_id: record.role_id.clone(),
            character_id: record.character_id,
            is_killer: record.is_killer,
            is_detective: record.is_detective,
            down_until: record.down_until,
            survey_result: record.survey_result.clone(),
            survey_completed: record.survey_completed,
        }
    }
}

/// Roster returned by `GET /api/players`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayersResponse {
    /// Every registered player.
    pub players: Vec<PlayerView>,
}

/// Body of `POST /api/auth/signin`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    /// First name to look up, case-insensitively.
    pub name: String,
}

impl Validate for SignInRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_display_name(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Session handed out by a successful sign-in.
#[derive(Debug, Serialize, ToSchema)]
pub struct SignInResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// The signed-in player.
    pub player: PlayerView,
}

/// Body of `POST /api/characters`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInput {
    /// Character name.
    pub name: String,
    /// What the character wants out of the evening.
    #[serde(default)]
    pub goals: Vec<String>,
    /// What gets in their way.
    #[serde(default)]
    pub flaws: Vec<String>,
    /// Narrative background handed to the player.
    #[serde(default)]
    pub backstory: String,
    /// Optional avatar asset path.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Validate for CharacterInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_display_name(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Envelope returned when a character is created.
#[derive(Debug, Serialize, ToSchema)]
pub struct CharacterEnvelope {
    /// The created character.
    pub character: CharacterRecord,
}

/// Body of `POST /api/players/{id}/assign-character`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignCharacterRequest {
    /// Character to assign, by reference.
    pub character_id: Uuid,
}
