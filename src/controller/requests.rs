use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use crate::error::{RestError, RestResult};
use crate::model::NewServiceRequest;
use crate::notify::Dispatcher;
use crate::settings::WorkflowSettings;
use crate::workflow::service_requests;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestBody {
    client_name: String,
    client_email: String,
    project_type: String,
    budget: String,
    timeline: String,
    project_description: String,
}

impl TryFrom<ServiceRequestBody> for NewServiceRequest {
    type Error = String;

    fn try_from(body: ServiceRequestBody) -> Result<Self, Self::Error> {
        let client_name = body.client_name.parse()?;
        let client_email = body.client_email.parse()?;
        if body.project_type.trim().is_empty() {
            return Err("Project type cannot be empty".into());
        }
        if body.project_description.trim().is_empty() {
            return Err("Project description cannot be empty".into());
        }
        Ok(Self {
            client_name,
            client_email,
            project_type: body.project_type,
            budget: body.budget,
            timeline: body.timeline,
            project_description: body.project_description,
        })
    }
}

#[tracing::instrument(name = "Submit a service request", skip(pool, dispatcher, workflow))]
#[post("")]
async fn submit(
    body: web::Json<ServiceRequestBody>,
    pool: web::Data<PgPool>,
    dispatcher: web::Data<Dispatcher>,
    workflow: web::Data<WorkflowSettings>,
) -> RestResult<impl Responder> {
    let new_request: NewServiceRequest =
        body.into_inner().try_into().map_err(RestError::Validation)?;

    let (request, email) = service_requests::submit(
        pool.get_ref(),
        dispatcher.get_ref(),
        workflow.auto_advance_requests,
        new_request,
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": request,
        "email": email,
    })))
}

/// Service request API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/service-requests").service(submit)
}
