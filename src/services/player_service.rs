//! Registration, first-name sign-in, and character management.

use uuid::Uuid;

use crate::{
    dao::models::{CharacterRecord, PlayerRecord},
    dto::player::{
        AssignCharacterRequest, CharacterInput, PlayerView, RegisterRequest, SignInRequest,
    },
    error::ServiceError,
    state::SharedState,
};

/// Register a fresh player with zeroed ability timers.
pub async fn register(
    state: &SharedState,
    request: RegisterRequest,
) -> Result<PlayerView, ServiceError> {
    let record = PlayerRecord::new(request.name.trim().to_string(), request.role_id);
    let view = PlayerView::from(&record);

    state.players().write().await.players.push(record);
    state.persist_players().await?;

    Ok(view)
}

/// Everyone currently on the roster.
pub async fn roster(state: &SharedState) -> Vec<PlayerView> {
    let players = state.players().read().await;
    players.players.iter().map(PlayerView::from).collect()
}

/// Sign a player in by first name (case-insensitive) and hand out an opaque
/// session token. There is deliberately no credential beyond the name.
pub async fn sign_in(
    state: &SharedState,
    request: SignInRequest,
) -> Result<(String, PlayerView), ServiceError> {
    let wanted = request.name.trim().to_lowercase();

    let view = {
        let players = state.players().read().await;
        players
            .players
            .iter()
            .find(|player| {
                player
                    .name
                    .split_whitespace()
                    .next()
                    .is_some_and(|first| first.to_lowercase() == wanted)
            })
            .map(PlayerView::from)
            .ok_or_else(|| {
                ServiceError::NotFound(
                    "first name not found; register first or check the spelling".into(),
                )
            })?
    };

    let token = Uuid::new_v4().simple().to_string();
    state.sessions().insert(token.clone(), view.id);

    Ok((token, view))
}

/// Resolve a bearer token back to its player.
pub async fn verify(state: &SharedState, token: &str) -> Result<PlayerView, ServiceError> {
    let player_id = state
        .sessions()
        .get(token)
        .map(|entry| *entry.value())
        .ok_or_else(|| ServiceError::Forbidden("invalid or expired token".into()))?;

    let players = state.players().read().await;
    players
        .player(player_id)
        .map(PlayerView::from)
        .ok_or_else(|| ServiceError::NotFound("player not found".into()))
}

/// Every authored character.
pub async fn characters(state: &SharedState) -> Vec<CharacterRecord> {
    state.characters().read().await.characters.clone()
}

/// Author a new character.
pub async fn create_character(
    state: &SharedState,
    input: CharacterInput,
) -> Result<CharacterRecord, ServiceError> {
    let record = CharacterRecord {
        id: Uuid::new_v4(),
        name: input.name.trim().to_string(),
        goals: input.goals,
        flaws: input.flaws,
        backstory: input.backstory,
        avatar: input.avatar,
    };

    state
        .characters()
        .write()
        .await
        .characters
        .push(record.clone());
    state.persist_characters().await?;

    Ok(record)
}

/// Assign a character to a player, by reference.
pub async fn assign_character(
    state: &SharedState,
    player_id: Uuid,
    request: AssignCharacterRequest,
) -> Result<(), ServiceError> {
    {
        let characters = state.characters().read().await;
        if !characters
            .characters
            .iter()
            .any(|character| character.id == request.character_id)
        {
            return Err(ServiceError::NotFound("character not found".into()));
        }
    }

    {
        let mut players = state.players().write().await;
        let player = players
            .player_mut(player_id)
            .ok_or_else(|| ServiceError::NotFound("player not found".into()))?;
        player.character_id = Some(request.character_id);
    }

    state.persist_players().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{config::AppConfig, dao::file_store::FileStore, state::AppState};

    use super::*;

    async fn scratch_state() -> SharedState {
        let dir = std::env::temp_dir().join(format!("cluetrail-players-{}", Uuid::new_v4()));
        let store = FileStore::new(dir);
        store.ensure_dir().await.unwrap();
        AppState::load(AppConfig::default(), store).await
    }

    #[tokio::test]
    async fn sign_in_matches_the_first_name_case_insensitively() {
        let state = scratch_state().await;
        register(
            &state,
            RegisterRequest {
                name: "Edda Marsh".into(),
                role_id: None,
            },
        )
        .await
        .unwrap();

        let (token, player) = sign_in(
            &state,
            SignInRequest {
                name: " edda ".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(player.name, "Edda Marsh");

        let verified = verify(&state, &token).await.unwrap();
        assert_eq!(verified.id, player.id);
    }

    #[tokio::test]
    async fn sign_in_with_unknown_name_is_not_found() {
        let state = scratch_state().await;
        assert!(matches!(
            sign_in(
                &state,
                SignInRequest {
                    name: "Nobody".into()
                }
            )
            .await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn bogus_token_is_rejected() {
        let state = scratch_state().await;
        assert!(matches!(
            verify(&state, "deadbeef").await,
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn character_assignment_is_by_reference() {
        let state = scratch_state().await;
        let player = register(
            &state,
            RegisterRequest {
                name: "Edda Marsh".into(),
                role_id: Some("socialite".into()),
            },
        )
        .await
        .unwrap();

        let character = create_character(
            &state,
            CharacterInput {
                name: "Lady Blackwood".into(),
                goals: vec!["Protect the estate".into()],
                flaws: vec!["Gambling debts".into()],
                backstory: "Widowed twice, suspiciously.".into(),
                avatar: None,
            },
        )
        .await
        .unwrap();

        assign_character(
            &state,
            player.id,
            AssignCharacterRequest {
                character_id: character.id,
            },
        )
        .await
        .unwrap();

        let players = state.players().read().await;
        assert_eq!(
            players.player(player.id).unwrap().character_id,
            Some(character.id)
        );
    }

    #[tokio::test]
    async fn assigning_a_missing_character_fails() {
        let state = scratch_state().await;
        let player = register(
            &state,
            RegisterRequest {
                name: "Edda Marsh".into(),
                role_id: None,
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            assign_character(
                &state,
                player.id,
                AssignCharacterRequest {
                    character_id: Uuid::new_v4()
                }
            )
            .await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
