use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, PersonName};

/// Where a service request sits in the review pipeline.
///
/// The set is closed; unknown values are rejected at the API boundary rather
/// than stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "request_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Reviewing,
    Reviewed,
    Accepted,
    Rejected,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "request_priority", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestPriority {
    Low,
    Medium,
    High,
}

/// A service-request submission before persistence
#[derive(Debug)]
pub struct NewServiceRequest {
    pub client_name: PersonName,
    pub client_email: EmailAddress,
    pub project_type: String,
    /// Free text, e.g. "$5k-10k"
    pub budget: String,
    /// Free text, e.g. "2-3 months"
    pub timeline: String,
    pub project_description: String,
}

/// Stored service request record
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub project_description: String,
    pub status: RequestStatus,
    pub priority: RequestPriority,
    pub is_read: bool,
    pub proposal_sent: bool,
    pub proposal_sent_at: Option<DateTime<Utc>>,
    pub contract_signed: bool,
    pub contract_signed_at: Option<DateTime<Utc>>,
    pub email_sent: bool,
    pub email_id: Option<String>,
    /// Operator notes, appended one line per action
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
