use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::{common::AckResponse, contact::ContactRequest},
    error::AppError,
    services::contact_service,
    state::SharedState,
};

/// Route for the contact form.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/contact", post(submit_contact))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission stored", body = AckResponse),
        (status = 400, description = "Invalid submission")
    )
)]
/// Store a contact-form submission.
pub async fn submit_contact(
    State(state): State<SharedState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<AckResponse>, AppError> {
    payload.validate()?;
    contact_service::submit(&state, payload).await?;
    Ok(Json(AckResponse::ok()))
}
