use actix_web::dev::HttpServiceFactory;
use actix_web::{get, post, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use crate::client::ImageStore;
use crate::domain::{resolve_avatar, Rating};
use crate::error::{RestError, RestResult};
use crate::model::NewTestimonial;
use crate::notify::Dispatcher;
use crate::repo::{PageRequest, TestimonialFilter, TestimonialsRepo};
use crate::workflow::testimonials;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialBody {
    client_name: String,
    client_email: String,
    client_title: Option<String>,
    client_company: Option<String>,
    project_type: String,
    rating: i16,
    content: String,
    client_image: Option<String>,
    is_public: Option<bool>,
    consent: bool,
}

impl TryFrom<TestimonialBody> for NewTestimonial {
    type Error = String;

    fn try_from(body: TestimonialBody) -> Result<Self, Self::Error> {
        if !body.consent {
            return Err("Consent is required to submit a testimonial".into());
        }
        let client_name = body.client_name.parse()?;
        let client_email = body.client_email.parse()?;
        let rating = Rating::try_from(body.rating)?;
        if body.content.trim().is_empty() {
            return Err("Testimonial content cannot be empty".into());
        }
        if body.project_type.trim().is_empty() {
            return Err("Project type cannot be empty".into());
        }
        let client_image = resolve_avatar(&client_email, body.client_image.as_deref());
        Ok(Self {
            client_name,
            client_email,
            client_title: body.client_title,
            client_company: body.client_company,
            project_type: body.project_type,
            rating,
            content: body.content,
            client_image,
            is_public: body.is_public.unwrap_or(true),
            consent: body.consent,
        })
    }
}

#[tracing::instrument(name = "Submit a testimonial", skip(pool, dispatcher, image_store))]
#[post("")]
async fn submit(
    body: web::Json<TestimonialBody>,
    pool: web::Data<PgPool>,
    dispatcher: web::Data<Dispatcher>,
    image_store: web::Data<dyn ImageStore>,
) -> RestResult<impl Responder> {
    let new_testimonial: NewTestimonial =
        body.into_inner().try_into().map_err(RestError::Validation)?;

    let (testimonial, email) = testimonials::submit(
        pool.get_ref(),
        dispatcher.get_ref(),
        image_store.get_ref(),
        new_testimonial,
        None,
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": testimonial,
        "email": email,
    })))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    page: Option<u32>,
    limit: Option<u32>,
    featured: Option<bool>,
}

/// Approved, public testimonials only
#[tracing::instrument(name = "List public testimonials", skip(pool))]
#[get("")]
async fn feed(query: web::Query<FeedQuery>, pool: web::Data<PgPool>) -> RestResult<impl Responder> {
    let mut filter = TestimonialFilter::public_feed();
    filter.featured = query.featured;
    let page = PageRequest::new(query.page, query.limit);

    let listing = TestimonialsRepo::list(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(listing))
}

/// Testimonial API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/testimonials").service(submit).service(feed)
}
