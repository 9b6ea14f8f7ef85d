use uuid::Uuid;

use crate::{
    dao::models::ContactSubmission,
    dto::contact::ContactRequest,
    error::ServiceError,
    state::{SharedState, clock},
};

/// Store a contact-form submission.
pub async fn submit(state: &SharedState, request: ContactRequest) -> Result<(), ServiceError> {
    let submission = ContactSubmission {
        id: Uuid::new_v4(),
        name: request.name,
        email: request.email,
        message: request.message,
        at: clock::now_ms(),
    };

    state.contacts().write().await.submissions.push(submission);
    state.persist_contacts().await?;
    Ok(())
}
