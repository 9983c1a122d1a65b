use sqlx::PgPool;

use uuid::Uuid;

use crate::client::{ImageStore, ImageUpload};
use crate::error::{RestError, RestResult};
use crate::model::{NewTestimonial, Testimonial};
use crate::notify::{self, Dispatcher, DualOutcome};
use crate::repo::TestimonialsRepo;

/// Persist a testimonial submission. If an image was supplied and the upload
/// succeeds its URL replaces the generated avatar; an upload failure falls
/// back to the avatar rather than failing the submission. The paired send is
/// best-effort and its outcome is recorded on the record.
#[tracing::instrument(
    name = "Submit testimonial",
    skip(pool, dispatcher, image_store, new_testimonial, image)
)]
pub async fn submit(
    pool: &PgPool,
    dispatcher: &Dispatcher,
    image_store: &dyn ImageStore,
    mut new_testimonial: NewTestimonial,
    image: Option<ImageUpload>,
) -> RestResult<(Testimonial, DualOutcome)> {
    if let Some(image) = image {
        match image_store.upload(&image, "testimonials").await {
            Ok(url) => new_testimonial.client_image = url.to_string(),
            Err(error) => {
                tracing::warn!("Image upload failed, keeping generated avatar: {}", error);
            }
        }
    }

    let testimonial = TestimonialsRepo::insert(pool, &new_testimonial).await?;

    let (to_operator, to_submitter) =
        notify::testimonial_emails(&testimonial, dispatcher.operator(), new_testimonial.client_email);
    let outcome = dispatcher.send_pair(to_operator, to_submitter).await;

    let testimonial = TestimonialsRepo::record_email(
        pool,
        testimonial.id,
        outcome.success(),
        outcome.message_id(),
    )
    .await?
    .unwrap_or(testimonial);

    Ok((testimonial, outcome))
}

/// One-way and idempotent; revoking visibility requires delete
#[tracing::instrument(name = "Approve testimonial", skip(pool))]
pub async fn approve(pool: &PgPool, id: Uuid) -> RestResult<Testimonial> {
    TestimonialsRepo::approve(pool, id)
        .await?
        .ok_or(RestError::NotFound("Testimonial"))
}

/// No precondition on approval; an unapproved-but-featured testimonial is
/// harmless since the public feed filters on approval
#[tracing::instrument(name = "Set testimonial featured flag", skip(pool))]
pub async fn set_featured(pool: &PgPool, id: Uuid, featured: bool) -> RestResult<Testimonial> {
    TestimonialsRepo::set_featured(pool, id, featured)
        .await?
        .ok_or(RestError::NotFound("Testimonial"))
}

/// Rejection is deletion; there is no retained "rejected" state
#[tracing::instrument(name = "Delete testimonial", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> RestResult<()> {
    if !TestimonialsRepo::delete(pool, id).await? {
        return Err(RestError::NotFound("Testimonial"));
    }
    Ok(())
}
