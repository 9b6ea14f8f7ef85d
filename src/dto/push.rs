use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of `POST /api/push/subscribe`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscribeRequest {
    /// Player the subscription belongs to.
    pub player_id: Uuid,
    /// Opaque subscription object handed over by the browser.
    #[schema(value_type = Object)]
    pub subscription: serde_json::Value,
}

/// Body of `POST /api/push/unsubscribe`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushUnsubscribeRequest {
    /// Player whose subscription should be dropped.
    pub player_id: Uuid,
}
