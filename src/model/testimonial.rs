use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::Serialize;

use crate::domain::{EmailAddress, PersonName, Rating};

/// A testimonial submission before persistence.
///
/// `rating` and `consent` are validated at the boundary; a submission without
/// consent never reaches the store.
#[derive(Debug)]
pub struct NewTestimonial {
    pub client_name: PersonName,
    pub client_email: EmailAddress,
    pub client_title: Option<String>,
    pub client_company: Option<String>,
    pub project_type: String,
    pub rating: Rating,
    pub content: String,
    /// Resolved avatar URL (uploaded image or hash-of-email fallback)
    pub client_image: String,
    pub is_public: bool,
    pub consent: bool,
}

/// Stored testimonial record
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_title: Option<String>,
    pub client_company: Option<String>,
    pub project_type: String,
    pub rating: i16,
    pub content: String,
    pub client_image: String,
    /// Approval is one-way: there is no unapprove, only delete
    pub is_approved: bool,
    /// Independent of approval; has no public effect until approved
    pub featured: bool,
    pub is_public: bool,
    pub consent: bool,
    pub email_sent: bool,
    pub email_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
