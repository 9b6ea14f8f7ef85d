//! Tag content resolution, passphrase attempts, and the end-game code check.

use tracing::warn;

use crate::{
    dto::tag::{AttemptRequest, AttemptResponse, FinalRequest, FinalResponse, TagView},
    error::ServiceError,
    services::events,
    state::{SharedState, answers, clock},
};

/// Resolve the currently-visible content of a tag. The poison window alone
/// picks the variant; the safe flag is reported for UI badges only.
pub async fn tag_view(state: &SharedState, nfc_id: &str) -> Result<TagView, ServiceError> {
    let now = clock::now_ms();

    let tags = state.tags().read().await;
    let card = tags
        .card(nfc_id)
        .ok_or_else(|| ServiceError::NotFound("not found".into()))?;

    let game = state.game().read().await;
    let (poisoned, safe) = match game.nfc_state.get(nfc_id) {
        Some(status) => (status.poisoned_until > now, status.safe_until > now),
        None => (false, false),
    };

    Ok(TagView::from_card(card, poisoned, safe))
}

/// Check a passphrase against the visible content variant of a tag. A
/// mismatch (including an unresolvable answer) is a normal `{ok:false}`
/// result; a match awards the tag's reward letter, idempotently overwriting
/// any earlier award on the same slot.
pub async fn attempt(
    state: &SharedState,
    nfc_id: &str,
    request: AttemptRequest,
) -> Result<AttemptResponse, ServiceError> {
    let _gate = state.action_gate().lock().await;
    let now = clock::now_ms();

    let (route, index, letter, matched) = {
        let tags = state.tags().read().await;
        let card = tags
            .card(nfc_id)
            .ok_or_else(|| ServiceError::NotFound("not found".into()))?;

        let game = state.game().read().await;
        let poisoned = game
            .nfc_state
            .get(nfc_id)
            .is_some_and(|status| status.poisoned_until > now);
        let content = if poisoned { &card.decoy } else { &card.normal };

        let players = state.players().read().await;
        let matched = answers::resolve_answer(content.answer.as_ref(), &players)
            .is_some_and(|expected| answers::passphrase_matches(expected, &request.passphrase));

        (card.route, card.index, card.reward_char, matched)
    };

    if !matched {
        return Ok(AttemptResponse {
            ok: false,
            letter: None,
        });
    }

    {
        let mut game = state.game().write().await;
        let slot = game
            .letters
            .get_mut(&route)
            .and_then(|slots| slots.get_mut(index.saturating_sub(1) as usize));
        match slot {
            Some(slot) => *slot = Some(letter),
            // Catalog data out of range for the fixed-length route.
            None => warn!(nfc_id, index, "letter slot out of range; not recorded"),
        }
    }

    state.persist_game().await?;
    events::broadcast_letter_collected(state, nfc_id, route, index, letter);

    Ok(AttemptResponse {
        ok: true,
        letter: Some(letter),
    })
}

/// Check the submitted end-game code, broadcasting the win on a match.
pub async fn final_code(state: &SharedState, request: FinalRequest) -> FinalResponse {
    let expected = {
        let game = state.game().read().await;
        game.final_code.clone()
    };

    let ok = request.code.trim().eq_ignore_ascii_case(expected.trim());
    if ok {
        events::broadcast_win(state, request.accused);
    }

    FinalResponse { ok }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{
        config::AppConfig,
        dao::{
            file_store::FileStore,
            models::{PlayerRecord, Route, TagAnswer, TagCard, TagContent},
        },
        dto::actions::PoisonRequest,
        services::action_service,
        state::{AppState, SharedState},
    };

    use super::*;

    fn card(id: &str, route: Route, index: u32, reward: char) -> TagCard {
        TagCard {
            id: id.into(),
            title: format!("Checkpoint {index}"),
            route,
            index,
            reward_char: reward,
            normal: TagContent {
                next_riddle: "Under the clock that never ticks.".into(),
                pass_prompt: "What did the gardener whisper?".into(),
                answer: Some(TagAnswer::Literal("blue route".into())),
            },
            decoy: TagContent {
                next_riddle: "Behind the coat rack.".into(),
                pass_prompt: "What did the gardener whisper?".into(),
                answer: Some(TagAnswer::Literal("red herring".into())),
            },
        }
    }

    async fn scratch_state() -> SharedState {
        let dir = std::env::temp_dir().join(format!("cluetrail-tags-{}", Uuid::new_v4()));
        let store = FileStore::new(dir);
        store.ensure_dir().await.unwrap();
        let state = AppState::load(AppConfig::default(), store).await;
        state
            .tags()
            .write()
            .await
            .cards
            .push(card("tag-03", Route::Blue, 3, 'R'));
        state
    }

    #[tokio::test]
    async fn unknown_tag_is_not_found() {
        let state = scratch_state().await;
        assert!(tag_view(&state, "tag-99").await.is_err());
    }

    #[tokio::test]
    async fn poisoned_tag_shows_the_decoy_variant() {
        let state = scratch_state().await;
        let mut killer = PlayerRecord::new("Mara Vane".into(), None);
        killer.is_killer = true;
        let killer_id = killer.id;
        state.players().write().await.players.push(killer);

        let clean = tag_view(&state, "tag-03").await.unwrap();
        assert!(!clean.poisoned);
        assert_eq!(clean.next_riddle, "Under the clock that never ticks.");

        action_service::poison(
            &state,
            PoisonRequest {
                killer_id,
                nfc_id: "tag-03".into(),
            },
        )
        .await
        .unwrap();

        let poisoned = tag_view(&state, "tag-03").await.unwrap();
        assert!(poisoned.poisoned);
        assert_eq!(poisoned.next_riddle, "Behind the coat rack.");
    }

    #[tokio::test]
    async fn correct_passphrase_awards_the_letter() {
        let state = scratch_state().await;
        let mut receiver = state.hub().subscribe();

        let response = attempt(
            &state,
            "tag-03",
            AttemptRequest {
                player_id: None,
                passphrase: " Blue Route ".into(),
            },
        )
        .await
        .unwrap();
        assert!(response.ok);
        assert_eq!(response.letter, Some('R'));

        let game = state.game().read().await;
        assert_eq!(game.letters[&Route::Blue][2], Some('R'));

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.name, "letter:collected");
        assert_eq!(event.payload["index"], 3);
    }

    #[tokio::test]
    async fn wrong_passphrase_is_a_normal_negative_result() {
        let state = scratch_state().await;

        let response = attempt(
            &state,
            "tag-03",
            AttemptRequest {
                player_id: None,
                passphrase: "gold route".into(),
            },
        )
        .await
        .unwrap();
        assert!(!response.ok);
        assert_eq!(response.letter, None);

        let game = state.game().read().await;
        assert_eq!(game.letters[&Route::Blue][2], None);
    }

    #[tokio::test]
    async fn final_code_matches_case_insensitively_and_broadcasts() {
        let state = scratch_state().await;
        let mut receiver = state.hub().subscribe();

        let response = final_code(
            &state,
            FinalRequest {
                code: "blueroute2goldroute5".into(),
                accused: Some("Mara Vane".into()),
            },
        )
        .await;
        assert!(response.ok);

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.name, "game:win");
        assert_eq!(event.payload["accused"], "Mara Vane");
    }

    #[tokio::test]
    async fn wrong_final_code_stays_quiet() {
        let state = scratch_state().await;
        let mut receiver = state.hub().subscribe();

        let response = final_code(
            &state,
            FinalRequest {
                code: "wrong".into(),
                accused: None,
            },
        )
        .await;
        assert!(!response.ok);
        assert!(receiver.try_recv().is_err());
    }
}
