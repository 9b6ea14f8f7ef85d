//! Browser push subscription bookkeeping. Delivery itself is handled by the
//! frontend's service worker stack; the backend only stores the endpoints.

use crate::{
    dao::models::PushSubscriptionRecord,
    dto::push::{PushSubscribeRequest, PushUnsubscribeRequest},
    error::ServiceError,
    state::{SharedState, clock},
};

/// Store or refresh a player's push subscription.
pub async fn subscribe(
    state: &SharedState,
    request: PushSubscribeRequest,
) -> Result<(), ServiceError> {
    let record = PushSubscriptionRecord {
        subscription: request.subscription,
        updated_at: clock::now_ms(),
    };

    state
        .push()
        .write()
        .await
        .subscriptions
        .insert(request.player_id, record);
    state.persist_push().await?;
    Ok(())
}

/// Drop a player's push subscription, if one is stored.
pub async fn unsubscribe(
    state: &SharedState,
    request: PushUnsubscribeRequest,
) -> Result<(), ServiceError> {
    state
        .push()
        .write()
        .await
        .subscriptions
        .shift_remove(&request.player_id);
    state.persist_push().await?;
    Ok(())
}
