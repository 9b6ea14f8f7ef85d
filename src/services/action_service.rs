//! Timed role actions: poison, unpoison, safe-mark, kill, revive. Each
//! handler reads `now` once, runs the matching guard, applies the mutation,
//! persists every touched document, and only then broadcasts the delta.

use crate::{
    dto::actions::{KillRequest, PoisonRequest, ReviveRequest, SafeMarkRequest, UnpoisonRequest},
    error::ServiceError,
    services::events,
    state::{
        SharedState,
        clock::{self, minutes_ms},
        rules::{self, RuleViolation},
    },
};

/// Poison a tag on behalf of a killer.
pub async fn poison(state: &SharedState, request: PoisonRequest) -> Result<(), ServiceError> {
    let _gate = state.action_gate().lock().await;
    let now = clock::now_ms();

    let killer = {
        let players = state.players().read().await;
        players
            .player(request.killer_id)
            .cloned()
            .ok_or(RuleViolation::NotKiller)?
    };

    let until = {
        let mut game = state.game().write().await;
        rules::check_poison(&killer, &game, &request.nfc_id, now)?;
        let status = game.tag_status_mut(&request.nfc_id);
        rules::apply_poison(status, killer.id, now);
        status.poisoned_until
    };

    state.persist_game().await?;
    events::broadcast_tag_poisoned(state, &request.nfc_id, until);
    Ok(())
}

/// Clear a tag's poison on behalf of a detective.
pub async fn unpoison(state: &SharedState, request: UnpoisonRequest) -> Result<(), ServiceError> {
    let _gate = state.action_gate().lock().await;
    let now = clock::now_ms();

    {
        let mut players = state.players().write().await;
        let mut game = state.game().write().await;

        let cooldown = game.unpoison_cooldown_minutes;
        let detective = players
            .player_mut(request.detective_id)
            .ok_or(RuleViolation::NotDetective)?;
        rules::check_unpoison(detective, cooldown, now)?;

        game.tag_status_mut(&request.nfc_id).poisoned_until = 0;
        detective.abilities.unpoison_last_at = now;
    }

    state.persist_players().await?;
    state.persist_game().await?;
    events::broadcast_tag_unpoisoned(state, &request.nfc_id);
    Ok(())
}

/// Spend one of the team's safe marks on a tag.
pub async fn safe_mark(state: &SharedState, request: SafeMarkRequest) -> Result<(), ServiceError> {
    let _gate = state.action_gate().lock().await;
    let now = clock::now_ms();

    let until = {
        let mut game = state.game().write().await;
        rules::check_safe_mark(&game)?;

        let until = now + minutes_ms(game.safe_mark_minutes);
        game.tag_status_mut(&request.nfc_id).safe_until = until;
        game.safe_marks_left -= 1;
        until
    };

    state.persist_game().await?;
    events::broadcast_tag_safe(state, &request.nfc_id, until);
    Ok(())
}

/// Strike a player down on behalf of a killer.
pub async fn kill(state: &SharedState, request: KillRequest) -> Result<(), ServiceError> {
    let _gate = state.action_gate().lock().await;
    let now = clock::now_ms();

    {
        let mut players = state.players().write().await;
        let (cooldown, down_minutes) = {
            let game = state.game().read().await;
            (game.kill_cooldown_minutes, game.down_minutes)
        };

        let killer = players
            .player(request.killer_id)
            .cloned()
            .ok_or(RuleViolation::NotKiller)?;
        if !killer.is_killer {
            return Err(RuleViolation::NotKiller.into());
        }
        if players.player(request.target_id).is_none() {
            return Err(ServiceError::NotFound("no target".into()));
        }
        rules::check_kill(&killer, cooldown, now)?;

        if let Some(target) = players.player_mut(request.target_id) {
            target.down_until = now + minutes_ms(down_minutes);
        }
        if let Some(killer) = players.player_mut(request.killer_id) {
            killer.last_kill_at = now;
        }
    }

    state.persist_players().await?;
    events::broadcast_player_down(state, request.target_id);
    Ok(())
}

/// Revive a down player on behalf of a detective. The revive is counted
/// against the act computed at call time.
pub async fn revive(state: &SharedState, request: ReviveRequest) -> Result<(), ServiceError> {
    let _gate = state.action_gate().lock().await;
    let now = clock::now_ms();

    {
        let mut players = state.players().write().await;
        let act = {
            let game = state.game().read().await;
            clock::current_act(game.started_at, now)
        };

        let detective = players
            .player(request.detective_id)
            .cloned()
            .ok_or(RuleViolation::NotDetective)?;
        if !detective.is_detective {
            return Err(RuleViolation::NotDetective.into());
        }
        if players.player(request.target_id).is_none() {
            return Err(ServiceError::NotFound("no target".into()));
        }
        rules::check_revive(&detective, act)?;

        if let Some(target) = players.player_mut(request.target_id) {
            target.down_until = 0;
        }
        if let Some(detective) = players.player_mut(request.detective_id) {
            detective.abilities.revives.record(act);
        }
    }

    state.persist_players().await?;
    events::broadcast_player_revive(state, request.target_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{
        config::AppConfig,
        dao::{file_store::FileStore, models::PlayerRecord},
        error::ServiceError,
        state::{AppState, SharedState},
    };

    use super::*;

    async fn scratch_state() -> SharedState {
        let dir = std::env::temp_dir().join(format!("cluetrail-actions-{}", Uuid::new_v4()));
        let store = FileStore::new(dir);
        store.ensure_dir().await.unwrap();
        AppState::load(AppConfig::default(), store).await
    }

    async fn seed_player(state: &SharedState, name: &str, killer: bool, detective: bool) -> Uuid {
        let mut player = PlayerRecord::new(name.into(), None);
        player.is_killer = killer;
        player.is_detective = detective;
        let id = player.id;
        state.players().write().await.players.push(player);
        id
    }

    #[tokio::test]
    async fn kill_downs_the_target_and_broadcasts() {
        let state = scratch_state().await;
        let killer_id = seed_player(&state, "Mara Vane", true, false).await;
        let target_id = seed_player(&state, "Quiet Guest", false, false).await;
        let mut receiver = state.hub().subscribe();

        kill(
            &state,
            KillRequest {
                killer_id,
                target_id,
            },
        )
        .await
        .unwrap();

        {
            let players = state.players().read().await;
            assert!(players.player(target_id).unwrap().down_until > 0);
            assert!(players.player(killer_id).unwrap().last_kill_at > 0);
        }

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.name, "player:down");
        assert_eq!(event.payload["targetId"], target_id.to_string());
    }

    #[tokio::test]
    async fn second_kill_inside_the_cooldown_is_rejected() {
        let state = scratch_state().await;
        let killer_id = seed_player(&state, "Mara Vane", true, false).await;
        let target_id = seed_player(&state, "Quiet Guest", false, false).await;

        kill(
            &state,
            KillRequest {
                killer_id,
                target_id,
            },
        )
        .await
        .unwrap();

        let err = kill(
            &state,
            KillRequest {
                killer_id,
                target_id,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Precondition(reason) if reason == "cooldown"));
    }

    #[tokio::test]
    async fn kill_requires_an_existing_target() {
        let state = scratch_state().await;
        let killer_id = seed_player(&state, "Mara Vane", true, false).await;

        let err = kill(
            &state,
            KillRequest {
                killer_id,
                target_id: Uuid::new_v4(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(reason) if reason == "no target"));
    }

    #[tokio::test]
    async fn poison_stamps_the_window_and_safe_mark_blocks_it() {
        let state = scratch_state().await;
        let killer_id = seed_player(&state, "Mara Vane", true, false).await;
        let bystander_id = seed_player(&state, "Quiet Guest", false, false).await;

        safe_mark(
            &state,
            SafeMarkRequest {
                player_id: bystander_id,
                nfc_id: "tag-07".into(),
            },
        )
        .await
        .unwrap();

        let err = poison(
            &state,
            PoisonRequest {
                killer_id,
                nfc_id: "tag-07".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Precondition(reason) if reason == "tag is SAFE"));

        poison(
            &state,
            PoisonRequest {
                killer_id,
                nfc_id: "tag-08".into(),
            },
        )
        .await
        .unwrap();

        let game = state.game().read().await;
        assert!(game.nfc_state["tag-08"].poisoned_until > 0);
        assert_eq!(game.nfc_state["tag-08"].last_poisoned_by, Some(killer_id));
        assert_eq!(game.safe_marks_left, 1);
    }

    #[tokio::test]
    async fn unpoison_clears_the_window_and_stamps_the_detective() {
        let state = scratch_state().await;
        let killer_id = seed_player(&state, "Mara Vane", true, false).await;
        let detective_id = seed_player(&state, "Ira Voss", false, true).await;

        poison(
            &state,
            PoisonRequest {
                killer_id,
                nfc_id: "tag-02".into(),
            },
        )
        .await
        .unwrap();

        unpoison(
            &state,
            UnpoisonRequest {
                detective_id,
                nfc_id: "tag-02".into(),
            },
        )
        .await
        .unwrap();

        {
            let game = state.game().read().await;
            assert_eq!(game.nfc_state["tag-02"].poisoned_until, 0);
        }

        // The cooldown now applies to the next unpoison.
        let err = unpoison(
            &state,
            UnpoisonRequest {
                detective_id,
                nfc_id: "tag-02".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Precondition(reason) if reason == "cooldown"));
    }

    #[tokio::test]
    async fn revive_is_spent_for_the_whole_act() {
        let state = scratch_state().await;
        let detective_id = seed_player(&state, "Ira Voss", false, true).await;
        let first_id = seed_player(&state, "Quiet Guest", false, false).await;
        let second_id = seed_player(&state, "Late Guest", false, false).await;

        revive(
            &state,
            ReviveRequest {
                detective_id,
                target_id: first_id,
            },
        )
        .await
        .unwrap();

        // A different target does not matter; the act budget is spent.
        let err = revive(
            &state,
            ReviveRequest {
                detective_id,
                target_id: second_id,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Precondition(reason) if reason == "act revive used"));
    }

    #[tokio::test]
    async fn role_failures_map_to_forbidden() {
        let state = scratch_state().await;
        let bystander_id = seed_player(&state, "Quiet Guest", false, false).await;

        let err = poison(
            &state,
            PoisonRequest {
                killer_id: bystander_id,
                nfc_id: "tag-01".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(reason) if reason == "not killer"));

        let err = revive(
            &state,
            ReviveRequest {
                detective_id: bystander_id,
                target_id: bystander_id,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(reason) if reason == "not detective"));
    }
}
