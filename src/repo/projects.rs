use uuid::Uuid;

use serde::Deserialize;

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::domain::Slug;
use crate::model::{NewProject, Project, ProjectCategory, ProjectStatus, ProjectUpdate};

use super::{Page, PageRequest};

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub category: Option<ProjectCategory>,
    pub featured: Option<bool>,
    pub public: Option<bool>,
}

impl ProjectFilter {
    fn push_clauses(&self, query: &mut QueryBuilder<Postgres>) {
        if let Some(status) = self.status {
            query.push(" and status = ").push_bind(status);
        }
        if let Some(category) = self.category {
            query.push(" and category = ").push_bind(category);
        }
        if let Some(featured) = self.featured {
            query.push(" and featured = ").push_bind(featured);
        }
        if let Some(public) = self.public {
            query.push(" and is_public = ").push_bind(public);
        }
    }
}

pub struct ProjectsRepo;

impl ProjectsRepo {
    #[tracing::instrument(name = "Insert project", skip(executor))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_project: &NewProject,
        slug: &Slug,
    ) -> sqlx::Result<Project> {
        sqlx::query_as::<_, Project>(
            "insert into projects\
             (title, description, short_description, technologies, category, \
              featured, github_url, live_url, image_url, slug, is_public) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) returning *",
        )
        .bind(&new_project.title)
        .bind(&new_project.description)
        .bind(&new_project.short_description)
        .bind(&new_project.technologies)
        .bind(new_project.category)
        .bind(new_project.featured.unwrap_or(false))
        .bind(&new_project.github_url)
        .bind(&new_project.live_url)
        .bind(&new_project.image_url)
        .bind(slug.as_ref())
        .bind(new_project.is_public.unwrap_or(true))
        .fetch_one(executor)
        .await
    }

    pub async fn fetch<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<Project>> {
        sqlx::query_as::<_, Project>("select * from projects where id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn fetch_by_slug<'conn>(
        executor: impl PgExecutor<'conn>,
        slug: &str,
    ) -> sqlx::Result<Option<Project>> {
        sqlx::query_as::<_, Project>("select * from projects where slug = $1")
            .bind(slug)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "List projects", skip(pool))]
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> sqlx::Result<Page<Project>> {
        let mut count = QueryBuilder::new("select count(*) from projects where true");
        filter.push_clauses(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut select = QueryBuilder::new("select * from projects where true");
        filter.push_clauses(&mut select);
        select
            .push(" order by created_at desc limit ")
            .push_bind(page.limit())
            .push(" offset ")
            .push_bind(page.offset());
        let items = select.build_query_as::<Project>().fetch_all(pool).await?;

        Ok(Page::new(items, total, page))
    }

    /// Partial update; the slug never changes after creation
    #[tracing::instrument(name = "Update project", skip(executor, update))]
    pub async fn update<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        update: &ProjectUpdate,
    ) -> sqlx::Result<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "update projects set \
             title = coalesce($2, title), \
             description = coalesce($3, description), \
             short_description = coalesce($4, short_description), \
             technologies = coalesce($5, technologies), \
             category = coalesce($6, category), \
             github_url = coalesce($7, github_url), \
             live_url = coalesce($8, live_url), \
             image_url = coalesce($9, image_url), \
             is_public = coalesce($10, is_public), \
             updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.short_description)
        .bind(&update.technologies)
        .bind(update.category)
        .bind(&update.github_url)
        .bind(&update.live_url)
        .bind(&update.image_url)
        .bind(update.is_public)
        .fetch_optional(executor)
        .await
    }

    /// Any-to-any; non-linear moves like DEPLOYED -> MAINTENANCE are expected
    #[tracing::instrument(name = "Update project status", skip(executor))]
    pub async fn update_status<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        status: ProjectStatus,
    ) -> sqlx::Result<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "update projects set status = $2, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Set project featured flag", skip(executor))]
    pub async fn set_featured<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        featured: bool,
    ) -> sqlx::Result<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "update projects set featured = $2, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .bind(featured)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Delete project", skip(executor))]
    pub async fn delete<'conn>(executor: impl PgExecutor<'conn>, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("delete from projects where id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
