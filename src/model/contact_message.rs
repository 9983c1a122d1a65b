use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::Serialize;

use crate::domain::{EmailAddress, PersonName};

/// A contact-form submission before persistence
#[derive(Debug)]
pub struct NewContactMessage {
    pub name: PersonName,
    pub email: EmailAddress,
    pub subject: String,
    pub body: String,
}

/// Stored contact message record
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    /// Moderation flags. `is_replied` does not imply `is_read`; the two are
    /// deliberately independent.
    pub is_read: bool,
    pub is_replied: bool,
    pub reply_notes: Option<String>,
    /// Outcome of the confirmation email sent on submission
    pub email_sent: bool,
    pub email_id: Option<String>,
    /// NOTE: Auto-set by the repository on insert/update
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
