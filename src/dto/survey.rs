use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{SurveyAnswer, SurveyResponse},
    dto::{player::PlayerView, validation::validate_display_name},
};

/// Body of `POST /api/survey/submit`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmitRequest {
    /// Respondent name; a player account is created from it.
    pub name: String,
    /// Every answer given.
    pub answers: Vec<SurveyAnswer>,
    /// Role the survey computed; becomes the player's role label.
    pub result: String,
    /// Per-role tallies the client computed, kept for auditing.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub role_counts: Option<IndexMap<String, u32>>,
    /// Client-side submission timestamp; the server stamps its own when absent.
    #[serde(default)]
    pub timestamp: Option<u64>,
}

impl Validate for SurveySubmitRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_display_name(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Envelope returned after a survey submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SurveySubmitResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// Player created from the submission.
    pub player: PlayerView,
}

/// Aggregated results returned by `GET /api/survey/results`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResultsResponse {
    /// Every stored response.
    pub responses: Vec<SurveyResponse>,
    /// How often each role came out of the survey.
    #[schema(value_type = Object)]
    pub role_stats: IndexMap<String, u32>,
    /// Per-question tallies of the options picked.
    #[schema(value_type = Object)]
    pub question_stats: IndexMap<String, IndexMap<String, u32>>,
    /// Total number of stored responses.
    pub total_responses: usize,
}
