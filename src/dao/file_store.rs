//! Flat-file JSON persistence. Each named document is one pretty-printed
//! file under the data directory, read once at startup and overwritten
//! wholesale after every mutation. No locking, no schema versioning.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;
use tracing::warn;

use crate::dao::storage::{StorageError, StorageResult};

/// Logical names of the persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentName {
    /// The singleton game state.
    Game,
    /// The players roster.
    Players,
    /// Authored characters.
    Characters,
    /// The chat log.
    Messages,
    /// Contact-form submissions.
    Contacts,
    /// The tag catalog.
    NfcCards,
    /// Intake survey responses.
    SurveyData,
    /// Browser push subscriptions.
    PushSubscriptions,
}

impl DocumentName {
    /// File name backing the document.
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentName::Game => "game.json",
            DocumentName::Players => "players.json",
            DocumentName::Characters => "characters.json",
            DocumentName::Messages => "messages.json",
            DocumentName::Contacts => "contacts.json",
            DocumentName::NfcCards => "nfc_cards.json",
            DocumentName::SurveyData => "survey_data.json",
            DocumentName::PushSubscriptions => "push_subscriptions.json",
        }
    }
}

/// Handle to the data directory holding every persisted document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Build a store rooted at `dir`. The directory is created on demand by
    /// [`FileStore::ensure_dir`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).await.map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    /// Cheap liveness probe used by the health endpoint.
    pub async fn ping(&self) -> StorageResult<()> {
        fs::metadata(&self.dir).await.map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        Ok(())
    }

    /// Load a document, falling back to `fallback()` when the file is missing
    /// or unreadable. A corrupt file is logged and replaced by the fallback,
    /// matching the forgiving startup behavior the data set was authored for.
    pub async fn load_or<T, F>(&self, name: DocumentName, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.path(name);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "unparseable document; using fallback");
                    fallback()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => fallback(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable document; using fallback");
                fallback()
            }
        }
    }

    /// Serialize `value` and overwrite the document file.
    pub async fn save<T: Serialize>(&self, name: DocumentName, value: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Serialize {
            name: name.file_name(),
            source,
        })?;
        let path = self.path(name);
        fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Io { path, source })
    }

    fn path(&self, name: DocumentName) -> PathBuf {
        self.dir.join(name.file_name())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        count: u32,
        label: String,
    }

    fn scratch_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("cluetrail-store-{}", Uuid::new_v4()));
        FileStore::new(dir)
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let doc = Doc {
            count: 3,
            label: "gold".into(),
        };
        store.save(DocumentName::Game, &doc).await.unwrap();

        let loaded: Doc = store
            .load_or(DocumentName::Game, || panic!("fallback must not run"))
            .await;
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn missing_file_yields_fallback() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let loaded: Doc = store
            .load_or(DocumentName::Players, || Doc {
                count: 0,
                label: "fresh".into(),
            })
            .await;
        assert_eq!(loaded.label, "fresh");
    }

    #[tokio::test]
    async fn corrupt_file_yields_fallback() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();
        tokio::fs::write(store.dir().join("messages.json"), b"{not json")
            .await
            .unwrap();

        let loaded: Doc = store
            .load_or(DocumentName::Messages, || Doc {
                count: 9,
                label: "fallback".into(),
            })
            .await;
        assert_eq!(loaded.count, 9);
    }
}
