//! Persisted document shapes. One struct per flat JSON file, field names
//! matching the on-disk camelCase format.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{config::AppConfig, state::clock::Act};

/// Number of letter slots along each clue route.
pub const LETTER_SLOTS: usize = 10;

/// One of the two parallel clue tracks tags are placed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Route {
    /// The blue clue track.
    #[serde(rename = "BLUE")]
    Blue,
    /// The gold clue track.
    #[serde(rename = "GOLD")]
    Gold,
}

impl Route {
    /// All routes, in the order they are laid out in the persisted documents.
    pub const ALL: [Route; 2] = [Route::Blue, Route::Gold];
}

/// Coarse lifecycle of the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GamePhase {
    /// Players are registering; nothing is timed yet.
    #[serde(rename = "LOBBY")]
    Lobby,
    /// The game master has started the run.
    #[serde(rename = "RUN")]
    Run,
}

/// Physical location players can report to while down.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Medbay {
    /// Human-readable description handed out to players.
    pub name: String,
}

/// Mutable per-tag state, created lazily on first poison/safe/unpoison.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagStatus {
    /// Epoch milliseconds until which the tag shows decoy content (0 = never poisoned).
    #[serde(default)]
    pub poisoned_until: u64,
    /// Epoch milliseconds until which the tag rejects poison attempts (0 = not safe-marked).
    #[serde(default)]
    pub safe_until: u64,
    /// Killer who last poisoned the tag, if any.
    #[serde(default)]
    pub last_poisoned_by: Option<Uuid>,
}

/// The singleton game document, mutated in place and flushed wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    /// When the game master started the run; `None` while in the lobby.
    pub started_at: Option<u64>,
    /// Coarse run lifecycle.
    pub phase: GamePhase,
    /// Where down players wait out their timer.
    pub medbay: Medbay,
    /// Minutes a killer must wait between kills.
    pub kill_cooldown_minutes: u64,
    /// Minutes a killed player stays down without a revive.
    pub down_minutes: u64,
    /// Minutes a detective must wait between unpoisons.
    pub unpoison_cooldown_minutes: u64,
    /// Minutes a safe mark protects a tag.
    pub safe_mark_minutes: u64,
    /// Truth badges the team may still spend. Floor 0.
    pub truth_badges_left: u32,
    /// Safe marks the team may still place. Floor 0.
    pub safe_marks_left: u32,
    /// Clue syncs left per route.
    pub clue_sync_left: IndexMap<Route, u32>,
    /// Collected reward letters, index-addressed per route.
    pub letters: IndexMap<Route, Vec<Option<char>>>,
    /// Secret checked verbatim (trimmed, case-insensitive) at the end game.
    pub final_code: String,
    /// Per-tag poison/safe windows keyed by tag id.
    #[serde(default)]
    pub nfc_state: IndexMap<String, TagStatus>,
}

impl GameDocument {
    /// Fresh lobby-phase document seeded from configuration defaults.
    pub fn fresh(config: &AppConfig) -> Self {
        let empty_route = || vec![None; LETTER_SLOTS];
        Self {
            started_at: None,
            phase: GamePhase::Lobby,
            medbay: Medbay {
                name: config.medbay.clone(),
            },
            kill_cooldown_minutes: config.kill_cooldown_minutes,
            down_minutes: config.down_minutes,
            unpoison_cooldown_minutes: config.unpoison_cooldown_minutes,
            safe_mark_minutes: config.safe_mark_minutes,
            truth_badges_left: config.truth_badges,
            safe_marks_left: config.safe_marks,
            clue_sync_left: Route::ALL.into_iter().map(|route| (route, 1)).collect(),
            letters: Route::ALL
                .into_iter()
                .map(|route| (route, empty_route()))
                .collect(),
            final_code: config.final_code.clone(),
            nfc_state: IndexMap::new(),
        }
    }

    /// Borrow the mutable state record for a tag, creating it on first access.
    pub fn tag_status_mut(&mut self, nfc_id: &str) -> &mut TagStatus {
        self.nfc_state.entry(nfc_id.to_string()).or_default()
    }

    /// Number of distinct tags whose last poison was placed by `killer_id`.
    pub fn distinct_poisoned_by(&self, killer_id: Uuid) -> usize {
        self.nfc_state
            .values()
            .filter(|status| status.last_poisoned_by == Some(killer_id))
            .count()
    }
}

/// Per-act revive usage ledger for a detective.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReviveLedger {
    /// Revives spent during act I.
    #[serde(rename = "ACT_I", default)]
    pub act_i: u32,
    /// Revives spent during act II.
    #[serde(rename = "ACT_II", default)]
    pub act_ii: u32,
    /// Revives spent during act III.
    #[serde(rename = "ACT_III", default)]
    pub act_iii: u32,
}

impl ReviveLedger {
    /// Revives already spent during `act`.
    pub fn used(&self, act: Act) -> u32 {
        match act {
            Act::I => self.act_i,
            Act::II => self.act_ii,
            Act::III => self.act_iii,
        }
    }

    /// Record one more revive spent during `act`.
    pub fn record(&mut self, act: Act) {
        match act {
            Act::I => self.act_i += 1,
            Act::II => self.act_ii += 1,
            Act::III => self.act_iii += 1,
        }
    }
}

/// Timed ability bookkeeping attached to every player.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Abilities {
    /// When the player last performed an unpoison (0 = never).
    #[serde(default)]
    pub unpoison_last_at: u64,
    /// Per-act revive usage, capped at one per act.
    #[serde(default)]
    pub revives: ReviveLedger,
}

/// A registered participant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Stable identifier.
    pub id: Uuid,
    /// Full display name; sign-in matches on the first word.
    pub name: String,
    /// Free-form role label chosen or derived at registration.
    #[serde(default)]
    pub role_id: Option<String>,
    /// Assigned character, by reference.
    #[serde(default)]
    pub character_id: Option<Uuid>,
    /// Killer flag. Mutually exclusive with `is_detective` in practice;
    /// killer wins if both are set.
    #[serde(default)]
    pub is_killer: bool,
    /// Detective flag.
    #[serde(default)]
    pub is_detective: bool,
    /// When this player last performed a kill (0 = never).
    #[serde(default)]
    pub last_kill_at: u64,
    /// Epoch milliseconds until which the player is down (0 = up).
    #[serde(default)]
    pub down_until: u64,
    /// Timed ability bookkeeping.
    #[serde(default)]
    pub abilities: Abilities,
    /// Free-form fields passphrase answers may reference by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schema(value_type = Object)]
    pub fields: IndexMap<String, String>,
    /// Role the intake survey computed for this player, if they took it.
    #[serde(default)]
    pub survey_result: Option<String>,
    /// Whether the player registered through the intake survey.
    #[serde(default)]
    pub survey_completed: bool,
}

impl PlayerRecord {
    /// Fresh record with zeroed timers and no role flags.
    pub fn new(name: String, role_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            role_id,
            character_id: None,
            is_killer: false,
            is_detective: false,
            last_kill_at: 0,
            down_until: 0,
            abilities: Abilities::default(),
            fields: IndexMap::new(),
            survey_result: None,
            survey_completed: false,
        }
    }
}

/// The players roster document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayersDocument {
    /// Every registered player, in registration order.
    pub players: Vec<PlayerRecord>,
}

impl PlayersDocument {
    /// Look a player up by id.
    pub fn player(&self, id: Uuid) -> Option<&PlayerRecord> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Look a player up by id, mutably.
    pub fn player_mut(&mut self, id: Uuid) -> Option<&mut PlayerRecord> {
        self.players.iter_mut().find(|player| player.id == id)
    }
}

/// A playable character, assigned to players by reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Stable identifier.
    pub id: Uuid,
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

/// The characters document. Persisted as a bare JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharactersDocument {
    /// Every authored character.
    pub characters: Vec<CharacterRecord>,
}

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Stable identifier.
    pub id: Uuid,
    /// Sender, when the connection identified itself.
    #[serde(default)]
    pub player_id: Option<Uuid>,
    /// Display name the sender typed.
    pub author: String,
    /// Message body.
    pub body: String,
    /// Epoch milliseconds when the server accepted the message.
    pub at: u64,
}

/// The chat log document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesDocument {
    /// Accepted messages, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Stable identifier.
    pub id: Uuid,
    /// Submitter name.
    pub name: String,
    /// Submitter email.
    pub email: String,
    /// Free-form message.
    pub message: String,
    /// Epoch milliseconds when the submission arrived.
    pub at: u64,
}

/// The contact submissions document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsDocument {
    /// Every submission, oldest first.
    pub submissions: Vec<ContactSubmission>,
}

/// Expected passphrase for a tag content variant: either a literal, or a
/// reference to a named field on a specific player's record resolved at
/// attempt time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TagAnswer {
    /// Fixed answer string.
    Literal(String),
    /// Lookup of `field` on the referenced player.
    #[serde(rename_all = "camelCase")]
    PlayerField {
        /// Player whose record holds the answer.
        player_id: Uuid,
        /// Name of the field to read.
        field: String,
    },
}

/// One content variant of a tag (the real one, or the decoy shown while
/// poisoned).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagContent {
    /// Riddle pointing at the next location.
    pub next_riddle: String,
    /// Prompt shown above the passphrase input.
    pub pass_prompt: String,
    /// Expected answer; `None` makes the variant unsolvable.
    #[serde(default)]
    pub answer: Option<TagAnswer>,
}

/// A physical location checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagCard {
    /// Tag identifier written on the physical card.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Clue track the tag belongs to.
    pub route: Route,
    /// 1-based position along the route.
    pub index: u32,
    /// Letter awarded for a correct passphrase.
    #[schema(value_type = String)]
    pub reward_char: char,
    /// Content shown while the tag is clean.
    pub normal: TagContent,
    /// Content shown while the tag is poisoned.
    pub decoy: TagContent,
}

/// The tag catalog document. Authored by hand, never written by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCatalog {
    /// Every physical tag in play.
    pub cards: Vec<TagCard>,
}

impl TagCatalog {
    /// Look a card up by tag id.
    pub fn card(&self, id: &str) -> Option<&TagCard> {
        self.cards.iter().find(|card| card.id == id)
    }
}

/// One answer given in the intake survey.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswer {
    /// Question the answer belongs to.
    pub question_id: String,
    /// Option the respondent picked.
    pub selected_option: String,
}

/// A stored intake survey response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Respondent name.
    pub name: String,
    /// Player created for this respondent.
    pub player_id: Uuid,
    /// Every answer given.
    pub answers: Vec<SurveyAnswer>,
    /// Role the survey computed.
    pub result: String,
    /// Per-role tallies the client computed, kept for auditing.
    #[serde(default)]
    pub role_counts: Option<IndexMap<String, u32>>,
    /// Epoch milliseconds when the response was recorded.
    pub timestamp: u64,
}

/// The survey responses document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyDocument {
    /// Every response, oldest first.
    pub responses: Vec<SurveyResponse>,
}

/// A stored browser push subscription.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscriptionRecord {
    /// Opaque subscription object handed over by the browser.
    #[schema(value_type = Object)]
    pub subscription: serde_json::Value,
    /// Epoch milliseconds when the subscription was last refreshed.
    pub updated_at: u64,
}

/// The push subscriptions document, keyed by player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushSubscriptionsDocument {
    /// Active subscriptions by player id.
    pub subscriptions: IndexMap<Uuid, PushSubscriptionRecord>,
}
