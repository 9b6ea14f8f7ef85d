use serde::Serialize;
use utoipa::ToSchema;

/// Bare acknowledgement returned by most mutating endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct AckResponse {
    /// Always `true`; failures surface through the error body instead.
    pub ok: bool,
}

impl AckResponse {
    /// Positive acknowledgement.
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
