use sqlx::PgPool;

use uuid::Uuid;

use crate::domain::Slug;
use crate::error::{RestError, RestResult};
use crate::model::{NewProject, Project, ProjectStatus, ProjectUpdate};
use crate::repo::ProjectsRepo;

/// Projects are created by the operator, not by public submission, so there
/// is no notification edge here
#[tracing::instrument(name = "Create project", skip(pool, new_project))]
pub async fn create(pool: &PgPool, new_project: NewProject) -> RestResult<Project> {
    if new_project.title.trim().is_empty() {
        return Err(RestError::Validation("Project title cannot be empty".into()));
    }
    let slug = Slug::derive(&new_project.title);
    let project = ProjectsRepo::insert(pool, &new_project, &slug).await?;
    Ok(project)
}

#[tracing::instrument(name = "Update project", skip(pool, update))]
pub async fn update(pool: &PgPool, id: Uuid, update: ProjectUpdate) -> RestResult<Project> {
    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(RestError::Validation("Project title cannot be empty".into()));
        }
    }
    ProjectsRepo::update(pool, id, &update)
        .await?
        .ok_or(RestError::NotFound("Project"))
}

#[tracing::instrument(name = "Update project status", skip(pool))]
pub async fn update_status(pool: &PgPool, id: Uuid, status: ProjectStatus) -> RestResult<Project> {
    ProjectsRepo::update_status(pool, id, status)
        .await?
        .ok_or(RestError::NotFound("Project"))
}

#[tracing::instrument(name = "Set project featured flag", skip(pool))]
pub async fn set_featured(pool: &PgPool, id: Uuid, featured: bool) -> RestResult<Project> {
    ProjectsRepo::set_featured(pool, id, featured)
        .await?
        .ok_or(RestError::NotFound("Project"))
}

#[tracing::instrument(name = "Delete project", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> RestResult<()> {
    if !ProjectsRepo::delete(pool, id).await? {
        return Err(RestError::NotFound("Project"));
    }
    Ok(())
}
