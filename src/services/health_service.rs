use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the data directory and report the backend's health.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().ping().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "data directory probe failed");
            HealthResponse::degraded()
        }
    }
}
