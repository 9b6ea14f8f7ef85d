use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::{
        common::AckResponse,
        survey::{SurveyResultsResponse, SurveySubmitRequest, SurveySubmitResponse},
    },
    error::AppError,
    services::survey_service,
    state::SharedState,
};

/// Routes for the intake survey.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/survey/submit", post(submit_survey))
        .route("/api/survey/results", get(survey_results))
        .route("/api/survey/clear", post(clear_survey))
}

#[utoipa::path(
    post,
    path = "/api/survey/submit",
    tag = "survey",
    request_body = SurveySubmitRequest,
    responses(
        (status = 200, description = "Response stored and player created", body = SurveySubmitResponse),
        (status = 400, description = "Missing name or answers")
    )
)]
/// Store a survey response and create the player it describes.
pub async fn submit_survey(
    State(state): State<SharedState>,
    Json(payload): Json<SurveySubmitRequest>,
) -> Result<Json<SurveySubmitResponse>, AppError> {
    payload.validate()?;
    let player = survey_service::submit(&state, payload).await?;
    Ok(Json(SurveySubmitResponse { ok: true, player }))
}

#[utoipa::path(
    get,
    path = "/api/survey/results",
    tag = "survey",
    responses((status = 200, description = "Aggregated results", body = SurveyResultsResponse))
)]
/// Return every response plus per-role and per-question tallies.
pub async fn survey_results(State(state): State<SharedState>) -> Json<SurveyResultsResponse> {
    Json(survey_service::results(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/survey/clear",
    tag = "survey",
    responses((status = 200, description = "Responses cleared", body = AckResponse))
)]
/// Drop every stored response.
pub async fn clear_survey(
    State(state): State<SharedState>,
) -> Result<Json<AckResponse>, AppError> {
    survey_service::clear(&state).await?;
    Ok(Json(AckResponse::ok()))
}
