//! Shared application state: the owned container for every persisted
//! document, the realtime hub, and the ephemeral connection registries.

pub mod answers;
pub mod clock;
pub mod events;
pub mod rules;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::{
        file_store::{DocumentName, FileStore},
        models::{
            CharactersDocument, ContactsDocument, GameDocument, MessagesDocument,
            PlayersDocument, PushSubscriptionsDocument, SurveyDocument, TagCatalog,
        },
        storage::StorageResult,
    },
};

pub use self::events::{EventHub, ServerEvent};

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Broadcast channel capacity for the realtime hub.
const HUB_CAPACITY: usize = 32;

/// Central application state. All game-affecting mutation is funneled through
/// the services layer, which serializes guard-then-mutate-then-persist
/// sequences behind [`AppState::action_gate`].
pub struct AppState {
    config: AppConfig,
    store: FileStore,
    game: RwLock<GameDocument>,
    players: RwLock<PlayersDocument>,
    characters: RwLock<CharactersDocument>,
    messages: RwLock<MessagesDocument>,
    contacts: RwLock<ContactsDocument>,
    tags: RwLock<TagCatalog>,
    survey: RwLock<SurveyDocument>,
    push: RwLock<PushSubscriptionsDocument>,
    hub: EventHub,
    online: DashMap<Uuid, Option<Uuid>>,
    sessions: DashMap<String, Uuid>,
    action_gate: Mutex<()>,
}

impl AppState {
    /// Load every document from the store (falling back to fresh defaults)
    /// and wrap the state in an [`Arc`] for sharing across handlers.
    pub async fn load(config: AppConfig, store: FileStore) -> SharedState {
        let game = store
            .load_or(DocumentName::Game, || GameDocument::fresh(&config))
            .await;
        let players = store
            .load_or(DocumentName::Players, PlayersDocument::default)
            .await;
        let characters = store
            .load_or(DocumentName::Characters, CharactersDocument::default)
            .await;
        let messages = store
            .load_or(DocumentName::Messages, MessagesDocument::default)
            .await;
        let contacts = store
            .load_or(DocumentName::Contacts, ContactsDocument::default)
            .await;
        let tags = store.load_or(DocumentName::NfcCards, TagCatalog::default).await;
        let survey = store
            .load_or(DocumentName::SurveyData, SurveyDocument::default)
            .await;
        let push = store
            .load_or(
                DocumentName::PushSubscriptions,
                PushSubscriptionsDocument::default,
            )
            .await;

        Arc::new(Self {
            config,
            store,
            game: RwLock::new(game),
            players: RwLock::new(players),
            characters: RwLock::new(characters),
            messages: RwLock::new(messages),
            contacts: RwLock::new(contacts),
            tags: RwLock::new(tags),
            survey: RwLock::new(survey),
            push: RwLock::new(push),
            hub: EventHub::new(HUB_CAPACITY),
            online: DashMap::new(),
            sessions: DashMap::new(),
            action_gate: Mutex::new(()),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Backing document store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// The singleton game document.
    pub fn game(&self) -> &RwLock<GameDocument> {
        &self.game
    }

    /// The players roster document.
    pub fn players(&self) -> &RwLock<PlayersDocument> {
        &self.players
    }

    /// The characters document.
    pub fn characters(&self) -> &RwLock<CharactersDocument> {
        &self.characters
    }

    /// The chat log document.
    pub fn messages(&self) -> &RwLock<MessagesDocument> {
        &self.messages
    }

    /// The contact submissions document.
    pub fn contacts(&self) -> &RwLock<ContactsDocument> {
        &self.contacts
    }

    /// The tag catalog document.
    pub fn tags(&self) -> &RwLock<TagCatalog> {
        &self.tags
    }

    /// The survey responses document.
    pub fn survey(&self) -> &RwLock<SurveyDocument> {
        &self.survey
    }

    /// The push subscriptions document.
    pub fn push(&self) -> &RwLock<PushSubscriptionsDocument> {
        &self.push
    }

    /// Broadcast hub every realtime transport subscribes to.
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// Live realtime connections mapped to the player they identified as.
    pub fn online(&self) -> &DashMap<Uuid, Option<Uuid>> {
        &self.online
    }

    /// Opaque sign-in tokens mapped to player ids. In-memory only.
    pub fn sessions(&self) -> &DashMap<String, Uuid> {
        &self.sessions
    }

    /// Mutex serializing every guard-then-mutate-then-persist sequence, so a
    /// guard never races the mutation it authorized.
    pub fn action_gate(&self) -> &Mutex<()> {
        &self.action_gate
    }

    /// Players currently identified on a live connection.
    pub fn online_players(&self) -> Vec<Uuid> {
        self.online
            .iter()
            .filter_map(|entry| *entry.value())
            .collect()
    }

    /// Flush the game document to disk.
    pub async fn persist_game(&self) -> StorageResult<()> {
        let doc = self.game.read().await;
        self.store.save(DocumentName::Game, &*doc).await
    }

    /// Flush the players document to disk.
    pub async fn persist_players(&self) -> StorageResult<()> {
        let doc = self.players.read().await;
        self.store.save(DocumentName::Players, &*doc).await
    }

    /// Flush the characters document to disk.
    pub async fn persist_characters(&self) -> StorageResult<()> {
        let doc = self.characters.read().await;
        self.store.save(DocumentName::Characters, &*doc).await
    }

    /// Flush the chat log to disk.
    pub async fn persist_messages(&self) -> StorageResult<()> {
        let doc = self.messages.read().await;
        self.store.save(DocumentName::Messages, &*doc).await
    }

    /// Flush the contact submissions to disk.
    pub async fn persist_contacts(&self) -> StorageResult<()> {
        let doc = self.contacts.read().await;
        self.store.save(DocumentName::Contacts, &*doc).await
    }

    /// Flush the survey responses to disk.
    pub async fn persist_survey(&self) -> StorageResult<()> {
        let doc = self.survey.read().await;
        self.store.save(DocumentName::SurveyData, &*doc).await
    }

    /// Flush the push subscriptions to disk.
    pub async fn persist_push(&self) -> StorageResult<()> {
        let doc = self.push.read().await;
        self.store.save(DocumentName::PushSubscriptions, &*doc).await
    }
}
