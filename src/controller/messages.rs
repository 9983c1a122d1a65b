use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use crate::error::{RestError, RestResult};
use crate::model::NewContactMessage;
use crate::notify::Dispatcher;
use crate::workflow::contact_messages;

#[derive(Debug, Deserialize)]
pub struct ContactBody {
    name: String,
    email: String,
    subject: String,
    body: String,
}

impl TryFrom<ContactBody> for NewContactMessage {
    type Error = String;

    fn try_from(body: ContactBody) -> Result<Self, Self::Error> {
        let name = body.name.parse()?;
        let email = body.email.parse()?;
        if body.subject.trim().is_empty() {
            return Err("Subject cannot be empty".into());
        }
        if body.body.trim().is_empty() {
            return Err("Message cannot be empty".into());
        }
        Ok(Self {
            name,
            email,
            subject: body.subject,
            body: body.body,
        })
    }
}

#[tracing::instrument(name = "Submit a contact message", skip(pool, dispatcher))]
#[post("")]
async fn submit(
    body: web::Json<ContactBody>,
    pool: web::Data<PgPool>,
    dispatcher: web::Data<Dispatcher>,
) -> RestResult<impl Responder> {
    let new_message: NewContactMessage =
        body.into_inner().try_into().map_err(RestError::Validation)?;

    let (message, email) =
        contact_messages::submit(pool.get_ref(), dispatcher.get_ref(), new_message).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": message,
        "email": email,
    })))
}

/// Contact form API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/contact").service(submit)
}
