use uuid::Uuid;

use serde::Deserialize;

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::model::{NewTestimonial, Testimonial};

use super::{Page, PageRequest};

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialFilter {
    pub approved: Option<bool>,
    pub featured: Option<bool>,
    pub public: Option<bool>,
}

impl TestimonialFilter {
    /// Public feed: approved and public only
    pub fn public_feed() -> Self {
        Self {
            approved: Some(true),
            featured: None,
            public: Some(true),
        }
    }

    fn push_clauses(&self, query: &mut QueryBuilder<Postgres>) {
        if let Some(approved) = self.approved {
            query.push(" and is_approved = ").push_bind(approved);
        }
        if let Some(featured) = self.featured {
            query.push(" and featured = ").push_bind(featured);
        }
        if let Some(public) = self.public {
            query.push(" and is_public = ").push_bind(public);
        }
    }
}

pub struct TestimonialsRepo;

impl TestimonialsRepo {
    #[tracing::instrument(name = "Insert testimonial", skip(executor))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_testimonial: &NewTestimonial,
    ) -> sqlx::Result<Testimonial> {
        sqlx::query_as::<_, Testimonial>(
            "insert into testimonials\
             (client_name, client_email, client_title, client_company, project_type, \
              rating, content, client_image, is_public, consent) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) returning *",
        )
        .bind(new_testimonial.client_name.as_ref())
        .bind(new_testimonial.client_email.as_ref())
        .bind(&new_testimonial.client_title)
        .bind(&new_testimonial.client_company)
        .bind(&new_testimonial.project_type)
        .bind(new_testimonial.rating.as_i16())
        .bind(&new_testimonial.content)
        .bind(&new_testimonial.client_image)
        .bind(new_testimonial.is_public)
        .bind(new_testimonial.consent)
        .fetch_one(executor)
        .await
    }

    pub async fn fetch<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<Testimonial>> {
        sqlx::query_as::<_, Testimonial>("select * from testimonials where id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "List testimonials", skip(pool))]
    pub async fn list(
        pool: &PgPool,
        filter: &TestimonialFilter,
        page: PageRequest,
    ) -> sqlx::Result<Page<Testimonial>> {
        let mut count = QueryBuilder::new("select count(*) from testimonials where true");
        filter.push_clauses(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut select = QueryBuilder::new("select * from testimonials where true");
        filter.push_clauses(&mut select);
        select
            .push(" order by created_at desc limit ")
            .push_bind(page.limit())
            .push(" offset ")
            .push_bind(page.offset());
        let items = select
            .build_query_as::<Testimonial>()
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    /// One-way: there is no unapprove. Re-approving is a no-op.
    #[tracing::instrument(name = "Approve testimonial", skip(executor))]
    pub async fn approve<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<Testimonial>> {
        sqlx::query_as::<_, Testimonial>(
            "update testimonials set is_approved = true, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Independent of approval state
    #[tracing::instrument(name = "Set testimonial featured flag", skip(executor))]
    pub async fn set_featured<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        featured: bool,
    ) -> sqlx::Result<Option<Testimonial>> {
        sqlx::query_as::<_, Testimonial>(
            "update testimonials set featured = $2, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .bind(featured)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Record testimonial email outcome", skip(executor))]
    pub async fn record_email<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        sent: bool,
        email_id: Option<&str>,
    ) -> sqlx::Result<Option<Testimonial>> {
        sqlx::query_as::<_, Testimonial>(
            "update testimonials set email_sent = $2, email_id = $3, \
             updated_at = now() where id = $1 returning *",
        )
        .bind(id)
        .bind(sent)
        .bind(email_id)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Delete testimonial", skip(executor))]
    pub async fn delete<'conn>(executor: impl PgExecutor<'conn>, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("delete from testimonials where id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
