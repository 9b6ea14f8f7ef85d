use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /api/contact`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ContactRequest {
    /// Submitter name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Submitter email.
    #[validate(email)]
    pub email: String,
    /// Free-form message.
    #[validate(length(min = 1))]
    pub message: String,
}
