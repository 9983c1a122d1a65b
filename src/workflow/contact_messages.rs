use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::model::{ContactMessage, NewContactMessage};
use crate::notify::{self, Dispatcher, DualOutcome};
use crate::repo::ContactMessagesRepo;

/// Persist a public contact-form submission and fire the paired notification.
/// A failed send never fails the submission; the outcome is recorded on the
/// record and reported to the caller as metadata.
#[tracing::instrument(name = "Submit contact message", skip(pool, dispatcher, new_message))]
pub async fn submit(
    pool: &PgPool,
    dispatcher: &Dispatcher,
    new_message: NewContactMessage,
) -> RestResult<(ContactMessage, DualOutcome)> {
    let message = ContactMessagesRepo::insert(pool, &new_message).await?;

    let (to_operator, to_submitter) =
        notify::contact_emails(&message, dispatcher.operator(), new_message.email);
    let outcome = dispatcher.send_pair(to_operator, to_submitter).await;

    let message =
        ContactMessagesRepo::record_email(pool, message.id, outcome.success(), outcome.message_id())
            .await?
            .unwrap_or(message);

    Ok((message, outcome))
}

/// Idempotent: marking an already-read message succeeds without error
#[tracing::instrument(name = "Mark message read", skip(pool))]
pub async fn mark_read(pool: &PgPool, id: Uuid) -> RestResult<ContactMessage> {
    ContactMessagesRepo::mark_read(pool, id)
        .await?
        .ok_or(RestError::NotFound("Message"))
}

/// Independent of `is_read`: a message may be replied to without being read
#[tracing::instrument(name = "Mark message replied", skip(pool))]
pub async fn mark_replied(
    pool: &PgPool,
    id: Uuid,
    notes: Option<String>,
) -> RestResult<ContactMessage> {
    ContactMessagesRepo::mark_replied(pool, id, notes.as_deref())
        .await?
        .ok_or(RestError::NotFound("Message"))
}

#[tracing::instrument(name = "Delete message", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> RestResult<()> {
    if !ContactMessagesRepo::delete(pool, id).await? {
        return Err(RestError::NotFound("Message"));
    }
    Ok(())
}
