use chrono::Utc;

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::model::{NewServiceRequest, RequestPriority, RequestStatus, ServiceRequest};
use crate::notify::{self, Dispatcher, DualOutcome};
use crate::repo::ServiceRequestsRepo;

/// Persist a service request and fire the paired notification. When both
/// sends succeed and `auto_advance` is on, the request moves PENDING ->
/// REVIEWING in the same breath: once the client has been told we received
/// it, it leaves the raw-pending bucket automatically. A failed send leaves
/// the record PENDING with email_sent=false.
#[tracing::instrument(
    name = "Submit service request",
    skip(pool, dispatcher, new_request)
)]
pub async fn submit(
    pool: &PgPool,
    dispatcher: &Dispatcher,
    auto_advance: bool,
    new_request: NewServiceRequest,
) -> RestResult<(ServiceRequest, DualOutcome)> {
    let request = ServiceRequestsRepo::insert(pool, &new_request).await?;

    let (to_operator, to_submitter) =
        notify::service_request_emails(&request, dispatcher.operator(), new_request.client_email);
    let outcome = dispatcher.send_pair(to_operator, to_submitter).await;

    let request = if outcome.success() {
        let status = if auto_advance {
            RequestStatus::Reviewing
        } else {
            request.status
        };
        let note = format!(
            "Confirmation email sent at {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        );
        ServiceRequestsRepo::record_confirmation(
            pool,
            request.id,
            status,
            outcome.message_id(),
            &note,
        )
        .await?
        .unwrap_or(request)
    } else {
        request
    };

    Ok((request, outcome))
}

/// Unconditional within the closed enum; terminal states do not lock the record
#[tracing::instrument(name = "Update request status", skip(pool))]
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: RequestStatus,
    notes: Option<String>,
) -> RestResult<ServiceRequest> {
    ServiceRequestsRepo::update_status(pool, id, status, notes.as_deref())
        .await?
        .ok_or(RestError::NotFound("Service request"))
}

#[tracing::instrument(name = "Update request priority", skip(pool))]
pub async fn update_priority(
    pool: &PgPool,
    id: Uuid,
    priority: RequestPriority,
) -> RestResult<ServiceRequest> {
    ServiceRequestsRepo::update_priority(pool, id, priority)
        .await?
        .ok_or(RestError::NotFound("Service request"))
}

#[tracing::instrument(name = "Update request proposal flag", skip(pool))]
pub async fn set_proposal(pool: &PgPool, id: Uuid, sent: bool) -> RestResult<ServiceRequest> {
    ServiceRequestsRepo::set_proposal(pool, id, sent)
        .await?
        .ok_or(RestError::NotFound("Service request"))
}

#[tracing::instrument(name = "Update request contract flag", skip(pool))]
pub async fn set_contract(pool: &PgPool, id: Uuid, signed: bool) -> RestResult<ServiceRequest> {
    ServiceRequestsRepo::set_contract(pool, id, signed)
        .await?
        .ok_or(RestError::NotFound("Service request"))
}

#[tracing::instrument(name = "Mark request read", skip(pool))]
pub async fn mark_read(pool: &PgPool, id: Uuid) -> RestResult<ServiceRequest> {
    ServiceRequestsRepo::mark_read(pool, id)
        .await?
        .ok_or(RestError::NotFound("Service request"))
}

#[tracing::instrument(name = "Delete request", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> RestResult<()> {
    if !ServiceRequestsRepo::delete(pool, id).await? {
        return Err(RestError::NotFound("Service request"));
    }
    Ok(())
}
