use actix_web::dev::HttpServiceFactory;
use actix_web::{get, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use crate::error::{RestError, RestResult};
use crate::model::ProjectCategory;
use crate::repo::{PageRequest, ProjectFilter, ProjectsRepo};

#[derive(Debug, Deserialize)]
pub struct PublicProjectQuery {
    page: Option<u32>,
    limit: Option<u32>,
    category: Option<ProjectCategory>,
    featured: Option<bool>,
}

#[tracing::instrument(name = "List public projects", skip(pool))]
#[get("")]
async fn list(
    query: web::Query<PublicProjectQuery>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let filter = ProjectFilter {
        status: None,
        category: query.category,
        featured: query.featured,
        public: Some(true),
    };
    let page = PageRequest::new(query.page, query.limit);

    let listing = ProjectsRepo::list(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(listing))
}

#[tracing::instrument(name = "Fetch a public project by slug", skip(pool))]
#[get("/{slug}")]
async fn fetch(path: web::Path<String>, pool: web::Data<PgPool>) -> RestResult<impl Responder> {
    let slug = path.into_inner();

    let project = ProjectsRepo::fetch_by_slug(pool.get_ref(), &slug)
        .await?
        .filter(|p| p.is_public)
        .ok_or(RestError::NotFound("Project"))?;

    Ok(HttpResponse::Ok().json(project))
}

/// Public project API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/projects").service(list).service(fetch)
}
