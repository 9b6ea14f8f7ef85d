//! Intake survey: a submission creates the player account and stores the
//! response for the aggregated results view.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    dao::models::{PlayerRecord, SurveyResponse},
    dto::{
        player::PlayerView,
        survey::{SurveyResultsResponse, SurveySubmitRequest},
    },
    error::ServiceError,
    state::{SharedState, clock},
};

/// Store a survey response and create the player it describes.
pub async fn submit(
    state: &SharedState,
    request: SurveySubmitRequest,
) -> Result<PlayerView, ServiceError> {
    if request.answers.is_empty() || request.result.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "missing required survey data".into(),
        ));
    }

    let name = request.name.trim().to_string();
    let mut player = PlayerRecord::new(name.clone(), Some(request.result.clone()));
    player.survey_result = Some(request.result.clone());
    player.survey_completed = true;
    let view = PlayerView::from(&player);

    let response = SurveyResponse {
        id: Uuid::new_v4(),
        name,
        player_id: player.id,
        answers: request.answers,
        result: request.result,
        role_counts: request.role_counts,
        timestamp: request.timestamp.unwrap_or_else(clock::now_ms),
    };

    state.players().write().await.players.push(player);
    state.persist_players().await?;

    state.survey().write().await.responses.push(response);
    state.persist_survey().await?;

    Ok(view)
}

/// Aggregate every stored response into per-role and per-question tallies.
pub async fn results(state: &SharedState) -> SurveyResultsResponse {
    let survey = state.survey().read().await;

    let mut role_stats: IndexMap<String, u32> = IndexMap::new();
    let mut question_stats: IndexMap<String, IndexMap<String, u32>> = IndexMap::new();

    for response in &survey.responses {
        *role_stats.entry(response.result.clone()).or_default() += 1;
        for answer in &response.answers {
            *question_stats
                .entry(answer.question_id.clone())
                .or_default()
                .entry(answer.selected_option.clone())
                .or_default() += 1;
        }
    }

    SurveyResultsResponse {
        total_responses: survey.responses.len(),
        responses: survey.responses.clone(),
        role_stats,
        question_stats,
    }
}

/// Drop every stored response.
pub async fn clear(state: &SharedState) -> Result<(), ServiceError> {
    state.survey().write().await.responses.clear();
    state.persist_survey().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        config::AppConfig,
        dao::{file_store::FileStore, models::SurveyAnswer},
        state::AppState,
    };

    use super::*;

    async fn scratch_state() -> SharedState {
        let dir = std::env::temp_dir().join(format!("cluetrail-survey-{}", Uuid::new_v4()));
        let store = FileStore::new(dir);
        store.ensure_dir().await.unwrap();
        AppState::load(AppConfig::default(), store).await
    }

    fn submission(name: &str, result: &str) -> SurveySubmitRequest {
        SurveySubmitRequest {
            name: name.into(),
            answers: vec![SurveyAnswer {
                question_id: "q1".into(),
                selected_option: "b".into(),
            }],
            result: result.into(),
            role_counts: None,
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn submission_creates_a_player_with_the_survey_role() {
        let state = scratch_state().await;

        let player = submit(&state, submission("Edda Marsh", "socialite"))
            .await
            .unwrap();
        assert_eq!(player.role_id.as_deref(), Some("socialite"));
        assert!(player.survey_completed);

        let roster = state.players().read().await;
        assert!(roster.player(player.id).is_some());
    }

    #[tokio::test]
    async fn results_tally_roles_and_answers() {
        let state = scratch_state().await;
        submit(&state, submission("Edda Marsh", "socialite"))
            .await
            .unwrap();
        submit(&state, submission("Ira Voss", "detective"))
            .await
            .unwrap();
        submit(&state, submission("Mara Vane", "socialite"))
            .await
            .unwrap();

        let aggregated = results(&state).await;
        assert_eq!(aggregated.total_responses, 3);
        assert_eq!(aggregated.role_stats["socialite"], 2);
        assert_eq!(aggregated.question_stats["q1"]["b"], 3);
    }

    #[tokio::test]
    async fn clear_empties_the_document() {
        let state = scratch_state().await;
        submit(&state, submission("Edda Marsh", "socialite"))
            .await
            .unwrap();
        clear(&state).await.unwrap();
        assert_eq!(results(&state).await.total_responses, 0);
    }

    #[tokio::test]
    async fn empty_answers_are_rejected() {
        let state = scratch_state().await;
        let mut request = submission("Edda Marsh", "socialite");
        request.answers.clear();
        assert!(matches!(
            submit(&state, request).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }
}
