use crate::{
    dao::models::GamePhase,
    dto::game::GameView,
    error::ServiceError,
    services::events,
    state::{SharedState, clock},
};

/// Start the run: stamp the start time, flip the phase, persist, broadcast.
/// Calling it again simply restamps, which the game master uses to restart a
/// botched opening.
pub async fn start_run(state: &SharedState) -> Result<(), ServiceError> {
    let _gate = state.action_gate().lock().await;
    let now = clock::now_ms();

    let (phase, started_at) = {
        let mut game = state.game().write().await;
        game.started_at = Some(now);
        game.phase = GamePhase::Run;
        (game.phase, game.started_at)
    };

    state.persist_game().await?;
    events::broadcast_phase(state, phase, started_at);
    Ok(())
}

/// Snapshot the public view of the game at the current instant.
pub async fn game_view(state: &SharedState) -> GameView {
    let game = state.game().read().await;
    GameView::from_document(&game, clock::now_ms())
}

#[cfg(test)]
mod tests {
    use crate::{
        config::AppConfig,
        dao::file_store::FileStore,
        state::AppState,
    };

    use super::*;

    async fn scratch_state() -> crate::state::SharedState {
        let dir = std::env::temp_dir().join(format!("cluetrail-game-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(dir);
        store.ensure_dir().await.unwrap();
        AppState::load(AppConfig::default(), store).await
    }

    #[tokio::test]
    async fn start_run_flips_phase_and_broadcasts() {
        let state = scratch_state().await;
        let mut receiver = state.hub().subscribe();

        start_run(&state).await.unwrap();

        let view = game_view(&state).await;
        assert_eq!(view.phase, GamePhase::Run);
        assert!(view.started_at.is_some());
        assert_eq!(view.act, Some(crate::state::clock::Act::I));

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.name, "game:phase");
        assert_eq!(event.payload["phase"], "RUN");
    }

    #[tokio::test]
    async fn lobby_view_has_no_act() {
        let state = scratch_state().await;
        let view = game_view(&state).await;
        assert_eq!(view.phase, GamePhase::Lobby);
        assert_eq!(view.act, None);
        assert_eq!(view.safe_marks_left, 2);
    }
}
