use serde::{Deserialize, Serialize};

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::RestResult;
use crate::model::{ProjectStatus, ProjectUpdate, RequestPriority, RequestStatus};

use super::{contact_messages, projects, service_requests, testimonials};

/// Every privileged mutation the dashboard can request, as a closed tagged
/// union. Adding an action is a compile-time-checked change; an unknown
/// `action` tag fails deserialization and is rejected as invalid input,
/// never silently ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AdminAction {
    MarkMessageRead {
        id: Uuid,
    },
    MarkMessageReplied {
        id: Uuid,
        notes: Option<String>,
    },
    DeleteMessage {
        id: Uuid,
    },
    UpdateRequestStatus {
        id: Uuid,
        status: RequestStatus,
        notes: Option<String>,
    },
    UpdateRequestPriority {
        id: Uuid,
        priority: RequestPriority,
    },
    UpdateProposal {
        id: Uuid,
        sent: bool,
    },
    UpdateContract {
        id: Uuid,
        signed: bool,
    },
    MarkRequestRead {
        id: Uuid,
    },
    DeleteRequest {
        id: Uuid,
    },
    ApproveTestimonial {
        id: Uuid,
    },
    /// Rejection deletes the record outright
    RejectTestimonial {
        id: Uuid,
    },
    SetFeaturedTestimonial {
        id: Uuid,
        featured: bool,
    },
    UpdateProjectStatus {
        id: Uuid,
        status: ProjectStatus,
    },
    SetFeaturedProject {
        id: Uuid,
        featured: bool,
    },
    UpdateProject {
        id: Uuid,
        #[serde(flatten)]
        fields: Box<ProjectUpdate>,
    },
    DeleteProject {
        id: Uuid,
    },
}

/// Response shape for every dashboard mutation
#[derive(Debug, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ActionOutcome {
    fn with_data<T: Serialize>(data: &T) -> RestResult<Self> {
        let data = serde_json::to_value(data)
            .map_err(|e| anyhow::anyhow!("Failed to serialize response data: {}", e))?;
        Ok(Self {
            success: true,
            data: Some(data),
        })
    }

    fn deleted() -> Self {
        Self {
            success: true,
            data: None,
        }
    }
}

/// Exhaustive dispatch of a dashboard action into the workflow engine
#[tracing::instrument(name = "Apply admin action", skip(pool))]
pub async fn apply(pool: &PgPool, action: AdminAction) -> RestResult<ActionOutcome> {
    match action {
        AdminAction::MarkMessageRead { id } => {
            ActionOutcome::with_data(&contact_messages::mark_read(pool, id).await?)
        }
        AdminAction::MarkMessageReplied { id, notes } => {
            ActionOutcome::with_data(&contact_messages::mark_replied(pool, id, notes).await?)
        }
        AdminAction::DeleteMessage { id } => {
            contact_messages::delete(pool, id).await?;
            Ok(ActionOutcome::deleted())
        }
        AdminAction::UpdateRequestStatus { id, status, notes } => {
            ActionOutcome::with_data(&service_requests::update_status(pool, id, status, notes).await?)
        }
        AdminAction::UpdateRequestPriority { id, priority } => {
            ActionOutcome::with_data(&service_requests::update_priority(pool, id, priority).await?)
        }
        AdminAction::UpdateProposal { id, sent } => {
            ActionOutcome::with_data(&service_requests::set_proposal(pool, id, sent).await?)
        }
        AdminAction::UpdateContract { id, signed } => {
            ActionOutcome::with_data(&service_requests::set_contract(pool, id, signed).await?)
        }
        AdminAction::MarkRequestRead { id } => {
            ActionOutcome::with_data(&service_requests::mark_read(pool, id).await?)
        }
        AdminAction::DeleteRequest { id } => {
            service_requests::delete(pool, id).await?;
            Ok(ActionOutcome::deleted())
        }
        AdminAction::ApproveTestimonial { id } => {
            ActionOutcome::with_data(&testimonials::approve(pool, id).await?)
        }
        AdminAction::RejectTestimonial { id } => {
            testimonials::delete(pool, id).await?;
            Ok(ActionOutcome::deleted())
        }
        AdminAction::SetFeaturedTestimonial { id, featured } => {
            ActionOutcome::with_data(&testimonials::set_featured(pool, id, featured).await?)
        }
        AdminAction::UpdateProjectStatus { id, status } => {
            ActionOutcome::with_data(&projects::update_status(pool, id, status).await?)
        }
        AdminAction::SetFeaturedProject { id, featured } => {
            ActionOutcome::with_data(&projects::set_featured(pool, id, featured).await?)
        }
        AdminAction::UpdateProject { id, fields } => {
            ActionOutcome::with_data(&projects::update(pool, id, *fields).await?)
        }
        AdminAction::DeleteProject { id } => {
            projects::delete(pool, id).await?;
            Ok(ActionOutcome::deleted())
        }
    }
}
